use ::errors::*;

use config::{PartyRules, ScoreWeights};
use party::constraint;
use party::score;
use roster::{Member, MemberId, Roster};

/// One party: up to `party_size` indices into the roster snapshot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Group
{
    members: Vec<MemberId>,
}

impl Group
{
    pub fn new() -> Group
    {
        Group::default()
    }

    pub fn members(&self) -> &[MemberId]
    {
        &self.members
    }

    pub fn len(&self) -> usize
    {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.members.is_empty()
    }

    pub fn contains(&self, id: MemberId) -> bool
    {
        self.members.contains(&id)
    }

    pub fn has_account(&self, roster: &Roster, account: &str) -> bool
    {
        self.members.iter().any(|&id| roster.member(id).account == account)
    }

    pub fn buffer_count(&self, roster: &Roster) -> usize
    {
        self.members.iter().filter(|&&id| roster.member(id).is_buffer()).count()
    }

    pub fn is_complete(&self, roster: &Roster, rules: &PartyRules) -> bool
    {
        let buffers = self.buffer_count(roster);

        self.len() == rules.party_size && buffers >= rules.min_buffers && buffers <= rules.max_buffers
    }

    pub fn resolve<'a>(&self, roster: &'a Roster) -> Vec<&'a Member>
    {
        self.members.iter().map(|&id| roster.member(id)).collect()
    }

    /// Always recomputed from the current members
    pub fn score(&self, roster: &Roster, weights: &ScoreWeights) -> f64
    {
        score::score(self.members.iter().map(|&id| roster.member(id)), weights)
    }

    /// What the score would be with `candidate` added
    pub fn score_with(&self, roster: &Roster, weights: &ScoreWeights, candidate: MemberId) -> f64
    {
        score::score(self.members.iter().chain(Some(&candidate)).map(|&id| roster.member(id)), weights)
    }

    /// What the score would be with `incoming` in place of `outgoing`
    pub fn score_replacing(&self, roster: &Roster, weights: &ScoreWeights, outgoing: MemberId, incoming: MemberId) -> f64
    {
        let members = self.members.iter()
            .map(|&id| if id == outgoing { incoming } else { id })
            .map(|id| roster.member(id));

        score::score(members, weights)
    }

    /// The strongest buffer, anchor of the party's multiplier
    pub fn main_buffer(&self, roster: &Roster) -> Option<MemberId>
    {
        let mut main: Option<MemberId> = None;
        for &id in self.members.iter().filter(|&&id| roster.member(id).is_buffer())
        {
            match main
            {
                Some(current) if roster.member(current).power >= roster.member(id).power => {},
                _ => main = Some(id),
            }
        }

        main
    }

    pub fn add(&mut self, roster: &Roster, rules: &PartyRules, candidate: MemberId) -> Result<()>
    {
        if !constraint::can_add(roster, rules, self, candidate)
        {
            let member = roster.member(candidate);
            bail!(ErrorKind::ConstraintViolation(format!("{}/{} cannot join party {:?}", member.account, member.name, self.members)));
        }

        self.members.push(candidate);
        Ok(())
    }

    pub fn replace(&mut self, roster: &Roster, rules: &PartyRules, outgoing: MemberId, incoming: MemberId) -> Result<()>
    {
        if !constraint::can_replace(roster, rules, self, outgoing, incoming)
        {
            let member = roster.member(incoming);
            bail!(ErrorKind::ConstraintViolation(format!("{}/{} cannot replace member {} of party {:?}", member.account, member.name, outgoing, self.members)));
        }

        let slot = self.members.iter()
            .position(|&id| id == outgoing)
            .ok_or_else(|| ErrorKind::ConstraintViolation(format!("member {} is not in party {:?}", outgoing, self.members)))?;
        self.members[slot] = incoming;

        Ok(())
    }
}

/// Trades `member_a` of party `a` with `member_b` of party `b`. Nothing changes if the swap is rejected.
pub fn swap(groups: &mut [Group], roster: &Roster, rules: &PartyRules, a: usize, member_a: MemberId, b: usize, member_b: MemberId) -> Result<()>
{
    if a == b || a >= groups.len() || b >= groups.len()
    {
        bail!(ErrorKind::ConstraintViolation(format!("cannot swap between parties {} and {} of {}", a, b, groups.len())));
    }

    if !constraint::can_swap(roster, rules, &groups[a], member_a, &groups[b], member_b)
    {
        bail!(ErrorKind::ConstraintViolation(format!("swap of {} (party {}) and {} (party {}) breaks party rules", member_a, a, member_b, b)));
    }

    /* Both sides were checked, neither replace can fail now */
    groups[a].replace(roster, rules, member_a, member_b)?;
    groups[b].replace(roster, rules, member_b, member_a)?;

    Ok(())
}
