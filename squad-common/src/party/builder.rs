use config::PartyConfig;
use party::constraint;
use party::group::Group;
use party::partition::Partition;
use roster::{MemberId, Roster};

use std::cmp::{min, Ordering};
use std::collections::HashMap;

/// How many parties the roster can support: one buffer each and a full headcount
pub fn party_count(roster: &Roster, party_size: usize) -> usize
{
    if party_size == 0
    {
        return 0;
    }

    min(roster.buffer_ids().len(), roster.len() / party_size)
}

/// Builds the first feasible set of parties, without trying to balance them yet.
///
/// The strongest buffers each anchor a party. Everyone else, dealers first and then the spare buffers, goes
/// strongest first into the legal party with the fewest members, ties going to whichever party would end up
/// with the lowest score. Whoever fits nowhere is leftover. This never fails, an incomplete result is just
/// a worse result.
pub fn build(roster: &Roster, config: &PartyConfig) -> Partition
{
    let rules = &config.rules;

    let parties = party_count(roster, rules.party_size);
    if parties == 0
    {
        debug!("No party possible from {} members ({} buffers)", roster.len(), roster.buffer_ids().len());
        return Partition::unplaced(roster);
    }

    let account_sizes = roster.account_sizes();

    let mut buffers = roster.buffer_ids();
    buffers.sort_by(|&a, &b| by_placement_order(roster, &account_sizes, a, b));
    let spare_buffers = buffers.split_off(parties);

    let mut groups: Vec<Group> = Vec::with_capacity(parties);
    let mut leftover: Vec<MemberId> = Vec::new();

    for id in buffers.into_iter()
    {
        let mut group = Group::new();
        match group.add(roster, rules, id)
        {
            Ok(_) => groups.push(group),
            Err(error) =>
            {
                error!("Failed to seed party with {} because {}", id, error);
                leftover.push(id);
            },
        }
    }

    let mut dealers = roster.dealer_ids();
    dealers.sort_by(|&a, &b| by_placement_order(roster, &account_sizes, a, b));

    for candidate in dealers.into_iter().chain(spare_buffers.into_iter())
    {
        let placed = match neediest_group(roster, config, &groups, candidate)
        {
            Some(index) => groups[index].add(roster, rules, candidate).is_ok(),
            None => false,
        };

        let member = roster.member(candidate);
        if placed
        {
            trace!("Placed {}/{} ({})", member.account, member.name, member.power);
        } else
        {
            debug!("No party can take {}/{} ({})", member.account, member.name, member.power);
            leftover.push(candidate);
        }
    }

    Partition::new(groups, leftover)
}

/// Strongest first, characters of bigger accounts before smaller ones on equal power, then input order
fn by_placement_order(roster: &Roster, account_sizes: &HashMap<&str, usize>, a: MemberId, b: MemberId) -> Ordering
{
    let (member_a, member_b) = (roster.member(a), roster.member(b));
    let size = |account: &str| account_sizes.get(account).cloned().unwrap_or(0);

    member_b.power.partial_cmp(&member_a.power)
        .unwrap_or(Ordering::Equal)
        .then_with(|| size(&member_b.account).cmp(&size(&member_a.account)))
        .then_with(|| a.cmp(&b))
}

/// The legal party with the fewest members, ties broken by the lowest resulting score and then by index
fn neediest_group(roster: &Roster, config: &PartyConfig, groups: &[Group], candidate: MemberId) -> Option<usize>
{
    let mut best: Option<(usize, usize, f64)> = None;

    for (index, group) in groups.iter().enumerate()
    {
        if !constraint::can_add(roster, &config.rules, group, candidate)
        {
            continue;
        }

        let resulting = group.score_with(roster, &config.scoring, candidate);
        let better = match best
        {
            None => true,
            Some((_, size, score)) => group.len() < size || (group.len() == size && resulting < score),
        };

        if better
        {
            best = Some((index, group.len(), resulting));
        }
    }

    best.map(|(index, _, _)| index)
}
