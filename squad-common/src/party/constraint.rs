//! The only place that decides whether a party may change.
//!
//! Builder, reconciler and optimizer all ask these predicates, and `Group`'s mutating methods refuse anything
//! they reject, so a party never passes through an invalid state.

use config::PartyRules;
use party::group::Group;
use roster::{MemberId, Roster};

/// Can `candidate` join `group` as it is?
///
/// Buffers are capped at `max_buffers`; which under-buffered party a buffer should go to is the caller's call.
pub fn can_add(roster: &Roster, rules: &PartyRules, group: &Group, candidate: MemberId) -> bool
{
    if group.len() >= rules.party_size || group.contains(candidate)
    {
        return false;
    }

    let member = roster.member(candidate);
    if group.has_account(roster, &member.account)
    {
        return false;
    }

    !member.is_buffer() || group.buffer_count(roster) < rules.max_buffers
}

/// Can `incoming` take the place of `outgoing` in `group`?
///
/// The resulting party must keep distinct accounts and a buffer count within `[min_buffers, max_buffers]`.
pub fn can_replace(roster: &Roster, rules: &PartyRules, group: &Group, outgoing: MemberId, incoming: MemberId) -> bool
{
    if !group.contains(outgoing) || group.contains(incoming)
    {
        return false;
    }

    let incoming_member = roster.member(incoming);
    let collides = group.members()
        .iter()
        .filter(|&&id| id != outgoing)
        .any(|&id| roster.member(id).account == incoming_member.account);
    if collides
    {
        return false;
    }

    let mut buffers = group.buffer_count(roster);
    if roster.member(outgoing).is_buffer()
    {
        buffers -= 1;
    }
    if incoming_member.is_buffer()
    {
        buffers += 1;
    }

    buffers >= rules.min_buffers && buffers <= rules.max_buffers
}

/// Can `member_a` of `group_a` trade places with `member_b` of `group_b`?
pub fn can_swap(roster: &Roster, rules: &PartyRules, group_a: &Group, member_a: MemberId, group_b: &Group, member_b: MemberId) -> bool
{
    member_a != member_b
        && can_replace(roster, rules, group_a, member_a, member_b)
        && can_replace(roster, rules, group_b, member_b, member_a)
}
