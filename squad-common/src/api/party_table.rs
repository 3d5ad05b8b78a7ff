use ::errors::*;

use chrono::{DateTime, Utc};

use rmp_serde::Serializer;

use serde::Serialize;

use party::{Assignment, Group, Warning};
use roster::{Category, Member, MemberId, Role, Roster};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct Slot
{
    pub account: String,
    pub name: String,
    pub job: Option<String>,
    pub fame: Option<u32>,
    pub role: Role,
    pub power: f64,
}

impl<'a> From<&'a Member> for Slot
{
    fn from(member: &'a Member) -> Slot
    {
        Slot::new(member.account.clone(), member.name.clone(), member.job.clone(), member.fame, member.role, member.power)
    }
}

/// One party as a flat row: the main buffer plus three nullable slots
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct PartyRow
{
    pub category: Category,
    pub party: usize,
    pub buffer: Option<Slot>,
    pub slot1: Option<Slot>,
    pub slot2: Option<Slot>,
    pub slot3: Option<Slot>,
    pub score: f64,
}

impl PartyRow
{
    /// Main buffer first, everyone else by descending power
    pub fn from_group(category: Category, party: usize, group: &Group, roster: &Roster, score: f64) -> PartyRow
    {
        let main_buffer = group.main_buffer(roster);

        let mut others: Vec<MemberId> = group.members()
            .iter()
            .cloned()
            .filter(|&id| Some(id) != main_buffer)
            .collect();
        others.sort_by(|&a, &b| roster.member(b).power.partial_cmp(&roster.member(a).power).unwrap_or(::std::cmp::Ordering::Equal));

        let mut others = others.into_iter().map(|id| Slot::from(roster.member(id)));

        PartyRow::new(category,
                      party,
                      main_buffer.map(|id| Slot::from(roster.member(id))),
                      others.next(),
                      others.next(),
                      others.next(),
                      score)
    }

    pub fn members(&self) -> Vec<&Slot>
    {
        vec!(&self.buffer, &self.slot1, &self.slot2, &self.slot3)
            .into_iter()
            .filter_map(|slot| slot.as_ref())
            .collect()
    }
}

/// A member no party could take
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct LeftoverRow
{
    pub category: Category,
    pub member: Slot,
}

/// Everything one category run hands to whoever stores or shows it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct CategoryResult
{
    pub category: Category,
    pub generated_at: DateTime<Utc>,
    pub parties: Vec<PartyRow>,
    pub leftover: Vec<LeftoverRow>,
    pub scores: Vec<f64>,
    pub range: f64,
    pub std_dev: f64,
    pub warnings: Vec<Warning>,
    pub passes: usize,
    pub converged: bool,
}

impl CategoryResult
{
    pub fn from_assignment(category: Category, roster: &Roster, assignment: &Assignment) -> CategoryResult
    {
        let parties = assignment.partition.groups
            .iter()
            .zip(assignment.scores.iter())
            .enumerate()
            .map(|(index, (group, &score))| PartyRow::from_group(category, index + 1, group, roster, score))
            .collect();

        let leftover = assignment.partition.leftover
            .iter()
            .map(|&id| LeftoverRow::new(category, Slot::from(roster.member(id))))
            .collect();

        CategoryResult::new(category,
                            Utc::now(),
                            parties,
                            leftover,
                            assignment.scores.clone(),
                            assignment.range,
                            assignment.std_dev,
                            assignment.warnings.clone(),
                            assignment.optimization.passes,
                            assignment.optimization.converged)
    }
}

pub fn to_json(results: &[CategoryResult]) -> Result<Vec<u8>>
{
    Ok(::serde_json::to_vec_pretty(results)?)
}

pub fn to_msgpack(results: &[CategoryResult]) -> Result<Vec<u8>>
{
    let mut serialized = Vec::new();
    results.serialize(&mut Serializer::new(&mut serialized))?;

    Ok(serialized)
}
