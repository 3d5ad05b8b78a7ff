use config::PartyRules;
use party::constraint;
use party::group::Group;
use party::partition::Partition;
use roster::{MemberId, Roster};

use std::collections::HashSet;
use std::mem;

/// Tries to get leftover members into a party after the initial build.
///
/// A leftover member either joins a party with a free, legal slot, or takes the place of someone who is
/// then moved on the same way. A chain that cannot end in a free slot is thrown away, so the number of
/// leftover members never goes up and nobody is dropped or duplicated.
pub fn reconcile(roster: &Roster, rules: &PartyRules, mut partition: Partition) -> Partition
{
    let mut leftover = mem::replace(&mut partition.leftover, Vec::new());

    loop
    {
        let mut placed_any = false;
        let mut still_waiting: Vec<MemberId> = Vec::with_capacity(leftover.len());

        for &candidate in leftover.iter()
        {
            match place(roster, rules, &partition.groups, candidate)
            {
                Some(groups) =>
                {
                    let member = roster.member(candidate);
                    debug!("Reconciled leftover {}/{}", member.account, member.name);

                    partition.groups = groups;
                    placed_any = true;
                },
                None => still_waiting.push(candidate),
            }
        }

        leftover = still_waiting;
        if !placed_any || leftover.is_empty()
        {
            break;
        }
    }

    partition.leftover = leftover;
    partition
}

/// Runs one displacement chain starting at `start` on a copy of the parties.
///
/// Nobody is moved twice in one chain, so the waiting member is different at every step, the leftover set
/// never repeats and the chain ends after at most one step per placed member.
///
/// # Return
/// * the new parties if the chain ended with someone in a free slot, `None` if it dead-ended
fn place(roster: &Roster, rules: &PartyRules, groups: &[Group], start: MemberId) -> Option<Vec<Group>>
{
    let mut trial = groups.to_vec();
    let mut displaced: HashSet<MemberId> = HashSet::new();
    let mut candidate = start;

    loop
    {
        displaced.insert(candidate);

        if let Some(index) = free_slot(roster, rules, &trial, candidate, None)
        {
            return match trial[index].add(roster, rules, candidate)
            {
                Ok(_) => Some(trial),
                Err(error) =>
                {
                    error!("Free slot rejected {} because {}", candidate, error);
                    None
                },
            };
        }

        let (index, outgoing) = pick_displacement(roster, rules, &trial, &displaced, candidate)?;
        if let Err(error) = trial[index].replace(roster, rules, outgoing, candidate)
        {
            error!("Displacement of {} by {} rejected because {}", outgoing, candidate, error);
            return None;
        }

        trace!("{} displaced {} in party {}", candidate, outgoing, index);
        candidate = outgoing;
    }
}

fn free_slot(roster: &Roster, rules: &PartyRules, groups: &[Group], candidate: MemberId, skip: Option<usize>) -> Option<usize>
{
    groups.iter()
        .enumerate()
        .filter(|&(index, _)| Some(index) != skip)
        .find(|&(_, group)| constraint::can_add(roster, rules, group, candidate))
        .map(|(index, _)| index)
}

/// Someone `candidate` may replace who has not been moved yet in this chain.
///
/// Prefers a member who would then fit straight into another party's free slot, so the chain ends next step.
fn pick_displacement(roster: &Roster, rules: &PartyRules, groups: &[Group], displaced: &HashSet<MemberId>, candidate: MemberId) -> Option<(usize, MemberId)>
{
    let mut fallback: Option<(usize, MemberId)> = None;

    for (index, group) in groups.iter().enumerate()
    {
        for &outgoing in group.members()
        {
            if displaced.contains(&outgoing) || !constraint::can_replace(roster, rules, group, outgoing, candidate)
            {
                continue;
            }

            if free_slot(roster, rules, groups, outgoing, Some(index)).is_some()
            {
                return Some((index, outgoing));
            }

            if fallback.is_none()
            {
                fallback = Some((index, outgoing));
            }
        }
    }

    fallback
}
