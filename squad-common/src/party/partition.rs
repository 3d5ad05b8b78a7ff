use ::errors::*;

use config::{PartyRules, ScoreWeights};
use party::group::Group;
use party::score;
use roster::{MemberId, Roster};

use std::collections::HashSet;

/// Parties plus everyone who could not be placed. Every roster member is in exactly one of the two.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, new)]
pub struct Partition
{
    pub groups: Vec<Group>,
    pub leftover: Vec<MemberId>,
}

impl Partition
{
    /// Nobody placed, used when not a single party can be formed
    pub fn unplaced(roster: &Roster) -> Partition
    {
        Partition::new(Vec::new(), roster.ids().collect())
    }

    pub fn scores(&self, roster: &Roster, weights: &ScoreWeights) -> Vec<f64>
    {
        self.groups.iter().map(|group| group.score(roster, weights)).collect()
    }

    pub fn std_dev(&self, roster: &Roster, weights: &ScoreWeights) -> f64
    {
        score::std_dev(&self.scores(roster, weights))
    }

    pub fn complete_count(&self, roster: &Roster, rules: &PartyRules) -> usize
    {
        self.groups.iter().filter(|group| group.is_complete(roster, rules)).count()
    }

    /// Re-checks every party rule and that parties plus leftover cover the roster exactly once
    pub fn verify(&self, roster: &Roster, rules: &PartyRules) -> Result<()>
    {
        let mut seen: HashSet<MemberId> = HashSet::with_capacity(roster.len());

        for (index, group) in self.groups.iter().enumerate()
        {
            if group.len() > rules.party_size
            {
                bail!(ErrorKind::ConstraintViolation(format!("party {} has {} members", index, group.len())));
            }

            let mut accounts = HashSet::with_capacity(group.len());
            for &id in group.members()
            {
                if id >= roster.len()
                {
                    bail!(ErrorKind::ConstraintViolation(format!("party {} holds unknown member {}", index, id)));
                }
                if !accounts.insert(roster.member(id).account.as_str())
                {
                    bail!(ErrorKind::ConstraintViolation(format!("party {} holds two characters of {}", index, roster.member(id).account)));
                }
            }

            let buffers = group.buffer_count(roster);
            if buffers > rules.max_buffers || (group.len() == rules.party_size && buffers < rules.min_buffers)
            {
                bail!(ErrorKind::ConstraintViolation(format!("party {} has {} buffers", index, buffers)));
            }

            for &id in group.members()
            {
                if !seen.insert(id)
                {
                    bail!(ErrorKind::ConstraintViolation(format!("member {} is placed twice", id)));
                }
            }
        }

        for &id in self.leftover.iter()
        {
            if id >= roster.len() || !seen.insert(id)
            {
                bail!(ErrorKind::ConstraintViolation(format!("leftover member {} is unknown or already placed", id)));
            }
        }

        if seen.len() != roster.len()
        {
            bail!(ErrorKind::ConstraintViolation(format!("{} of {} members are accounted for", seen.len(), roster.len())));
        }

        Ok(())
    }
}
