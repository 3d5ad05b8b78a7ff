extern crate squad_common;
extern crate env_logger;

use squad_common::config::PartyConfig;
use squad_common::party::{self, builder, optimizer, reconciler, Group, Partition, Warning};
use squad_common::roster::{Member, Role, Roster};

fn member(account: &str, name: &str, role: Role, power: f64) -> Member
{
    Member::new(account.to_string(), name.to_string(), None, None, role, power)
}

fn group(roster: &Roster, config: &PartyConfig, ids: &[usize]) -> Group
{
    let mut group = Group::new();
    for &id in ids
    {
        group.add(roster, &config.rules, id).unwrap();
    }

    group
}

/// Deterministic pseudo random roster, spread over a handful of accounts
fn generated_roster(size: usize, accounts: usize, seed: u64) -> Roster
{
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let members = (0..size)
        .map(|index| {
            let account = format!("account{}", index % accounts);
            let name = format!("character{}", index);
            if next() < 0.3
            {
                member(&account, &name, Role::Buffer, 300_000_000.0 + next() * 900_000_000.0)
            } else
            {
                member(&account, &name, Role::Dealer, 10_000_000.0 + next() * 190_000_000.0)
            }
        })
        .collect();

    Roster::new(members).unwrap()
}

#[test]
fn test_two_buffers_six_dealers()
{
    let _ = env_logger::try_init();
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer1", Role::Buffer, 900_000_000.0),
        member("b", "buffer2", Role::Buffer, 600_000_000.0),
        member("c", "dealer1", Role::Dealer, 50_000_000.0),
        member("d", "dealer2", Role::Dealer, 50_000_000.0),
        member("e", "dealer3", Role::Dealer, 50_000_000.0),
        member("f", "dealer4", Role::Dealer, 50_000_000.0),
        member("g", "dealer5", Role::Dealer, 50_000_000.0),
        member("h", "dealer6", Role::Dealer, 50_000_000.0),
    )).unwrap();

    assert_eq!(builder::party_count(&roster, 4), 2);

    let assignment = party::assign(&roster, &config);
    assignment.partition.verify(&roster, &config.rules).unwrap();

    assert_eq!(assignment.partition.groups.len(), 2);
    assert!(assignment.partition.leftover.is_empty());
    for group in assignment.partition.groups.iter()
    {
        assert_eq!(group.len(), 4);
        assert_eq!(group.buffer_count(&roster), 1);
    }

    /* Dealers are interchangeable, the only difference left is the buffers: 300 * 15 vs 200 * 15 */
    let mut scores = assignment.scores.clone();
    scores.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(scores, vec!(3000.0, 4500.0));
    assert!(assignment.optimization.converged);
    assert!(assignment.warnings.is_empty(), "{:?}", assignment.warnings);
}

#[test]
fn test_too_few_members_for_a_party()
{
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer", Role::Buffer, 900_000_000.0),
        member("b", "dealer1", Role::Dealer, 50_000_000.0),
        member("c", "dealer2", Role::Dealer, 50_000_000.0),
    )).unwrap();

    let assignment = party::assign(&roster, &config);
    assignment.partition.verify(&roster, &config.rules).unwrap();

    assert!(assignment.partition.groups.is_empty());
    assert_eq!(assignment.partition.leftover, vec!(0, 1, 2));
    assert_eq!(assignment.warnings, vec!(Warning::InsufficientMembers { members: 3 }));
    assert_eq!(assignment.std_dev, 0.0);
}

#[test]
fn test_no_buffers()
{
    let config = PartyConfig::default();
    let roster = Roster::new((0..8)
        .map(|index| member(&format!("account{}", index), "dealer", Role::Dealer, 50_000_000.0))
        .collect()).unwrap();

    let assignment = party::assign(&roster, &config);

    assert!(assignment.partition.groups.is_empty());
    assert_eq!(assignment.partition.leftover.len(), 8);
    assert_eq!(assignment.warnings, vec!(Warning::InsufficientBuffers));
}

#[test]
fn test_not_enough_dealers_to_fill_parties()
{
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer1", Role::Buffer, 900_000_000.0),
        member("b", "buffer2", Role::Buffer, 800_000_000.0),
        member("c", "dealer1", Role::Dealer, 50_000_000.0),
        member("c", "dealer2", Role::Dealer, 40_000_000.0),
        member("c", "dealer3", Role::Dealer, 30_000_000.0),
        member("c", "dealer4", Role::Dealer, 20_000_000.0),
        member("c", "dealer5", Role::Dealer, 10_000_000.0),
        member("c", "dealer6", Role::Dealer, 10_000_000.0),
    )).unwrap();

    let assignment = party::assign(&roster, &config);
    assignment.partition.verify(&roster, &config.rules).unwrap();

    /* One account can put a single dealer into each party */
    assert_eq!(assignment.partition.groups.len(), 2);
    assert_eq!(assignment.partition.leftover.len(), 4);
    assert_eq!(assignment.warnings, vec!(Warning::InsufficientDealers { incomplete_parties: 2 }));
}

#[test]
fn test_same_account_dealers_never_share_a_party()
{
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer", Role::Buffer, 900_000_000.0),
        member("b", "dealer1", Role::Dealer, 60_000_000.0),
        member("c", "dealer2", Role::Dealer, 50_000_000.0),
        member("d", "dealer3", Role::Dealer, 40_000_000.0),
        member("d", "dealer4", Role::Dealer, 30_000_000.0),
    )).unwrap();

    let assignment = party::assign(&roster, &config);
    assignment.partition.verify(&roster, &config.rules).unwrap();

    let party = &assignment.partition.groups[0];
    assert_eq!(party.len(), 4);
    assert!(party.contains(3) != party.contains(4), "exactly one of the two d dealers is placed");
    assert_eq!(assignment.partition.leftover.len(), 1);
}

#[test]
fn test_spare_buffer_joins_as_sub_buffer()
{
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer1", Role::Buffer, 900_000_000.0),
        member("b", "buffer2", Role::Buffer, 600_000_000.0),
        member("c", "dealer1", Role::Dealer, 90_000_000.0),
        member("d", "dealer2", Role::Dealer, 80_000_000.0),
    )).unwrap();

    let partition = builder::build(&roster, &config);

    /* Four members only support one party, the weaker buffer fills its last slot after the dealers */
    assert_eq!(partition.groups.len(), 1);
    assert_eq!(partition.groups[0].members(), &[0, 2, 3, 1]);
    assert!(partition.leftover.is_empty());
    assert_eq!(partition.groups[0].buffer_count(&roster), 2);
}

#[test]
fn test_builder_spreads_strong_dealers()
{
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer1", Role::Buffer, 900_000_000.0),
        member("b", "buffer2", Role::Buffer, 600_000_000.0),
        member("c", "dealer1", Role::Dealer, 90_000_000.0),
        member("d", "dealer2", Role::Dealer, 80_000_000.0),
        member("e", "dealer3", Role::Dealer, 20_000_000.0),
        member("f", "dealer4", Role::Dealer, 10_000_000.0),
        member("g", "dealer5", Role::Dealer, 10_000_000.0),
        member("h", "dealer6", Role::Dealer, 10_000_000.0),
    )).unwrap();

    let partition = builder::build(&roster, &config);
    partition.verify(&roster, &config.rules).unwrap();

    /* dealer1 goes to the weaker buffer, dealer2 to the party that is still smaller */
    assert!(partition.groups[1].contains(2));
    assert!(partition.groups[0].contains(3));
    assert!(partition.leftover.is_empty());
}

#[test]
fn test_reconciler_displaces_into_free_slot()
{
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer1", Role::Buffer, 900_000_000.0),
        member("b", "buffer2", Role::Buffer, 600_000_000.0),
        member("c", "dealer1", Role::Dealer, 50_000_000.0),
        member("d", "dealer2", Role::Dealer, 50_000_000.0),
        member("e", "dealer3", Role::Dealer, 50_000_000.0),
        member("x", "dealer4", Role::Dealer, 50_000_000.0),
        member("f", "dealer5", Role::Dealer, 50_000_000.0),
        member("x", "dealer6", Role::Dealer, 40_000_000.0),
    )).unwrap();

    let partition = Partition::new(
        vec!(group(&roster, &config, &[0, 2, 3, 4]), group(&roster, &config, &[1, 5, 6])),
        vec!(7));

    let partition = reconciler::reconcile(&roster, &config.rules, partition);
    partition.verify(&roster, &config.rules).unwrap();

    assert!(partition.leftover.is_empty());
    assert_eq!(partition.groups[0].members(), &[0, 7, 3, 4]);
    assert_eq!(partition.groups[1].members(), &[1, 5, 6, 2]);
}

#[test]
fn test_reconciler_keeps_partition_when_nothing_fits()
{
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer", Role::Buffer, 900_000_000.0),
        member("b", "dealer1", Role::Dealer, 60_000_000.0),
        member("c", "dealer2", Role::Dealer, 50_000_000.0),
        member("d", "dealer3", Role::Dealer, 40_000_000.0),
        member("d", "dealer4", Role::Dealer, 30_000_000.0),
    )).unwrap();

    let before = Partition::new(vec!(group(&roster, &config, &[0, 1, 2, 3])), vec!(4));
    let after = reconciler::reconcile(&roster, &config.rules, before.clone());

    assert_eq!(after, before);
}

#[test]
fn test_reconciler_rolls_back_a_chain_that_runs_out_of_members()
{
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer1", Role::Buffer, 900_000_000.0),
        member("b", "dealer1", Role::Dealer, 50_000_000.0),
        member("c", "dealer2", Role::Dealer, 50_000_000.0),
        member("d", "dealer3", Role::Dealer, 50_000_000.0),
        member("e", "buffer2", Role::Buffer, 600_000_000.0),
        member("f", "dealer4", Role::Dealer, 50_000_000.0),
        member("g", "dealer5", Role::Dealer, 50_000_000.0),
        member("h", "dealer6", Role::Dealer, 50_000_000.0),
        member("z", "dealer7", Role::Dealer, 70_000_000.0),
    )).unwrap();

    /* Every dealer can push out every other one, but no party ever has room */
    let before = Partition::new(
        vec!(group(&roster, &config, &[0, 1, 2, 3]), group(&roster, &config, &[4, 5, 6, 7])),
        vec!(8));
    let after = reconciler::reconcile(&roster, &config.rules, before.clone());

    assert_eq!(after, before);
    after.verify(&roster, &config.rules).unwrap();
}

#[test]
fn test_optimizer_lowers_std_dev()
{
    let _ = env_logger::try_init();
    let config = PartyConfig::default();
    let roster = Roster::new(vec!(
        member("a", "buffer1", Role::Buffer, 900_000_000.0),
        member("b", "dealer1", Role::Dealer, 90_000_000.0),
        member("c", "dealer2", Role::Dealer, 80_000_000.0),
        member("d", "dealer3", Role::Dealer, 70_000_000.0),
        member("e", "buffer2", Role::Buffer, 900_000_000.0),
        member("f", "dealer4", Role::Dealer, 10_000_000.0),
        member("g", "dealer5", Role::Dealer, 30_000_000.0),
        member("h", "dealer6", Role::Dealer, 60_000_000.0),
    )).unwrap();

    let mut partition = Partition::new(
        vec!(group(&roster, &config, &[0, 1, 2, 3]), group(&roster, &config, &[4, 5, 6, 7])),
        Vec::new());
    let before = partition.std_dev(&roster, &config.scoring);

    let outcome = optimizer::optimize(&roster, &config, &mut partition);
    partition.verify(&roster, &config.rules).unwrap();

    assert!(outcome.converged);
    assert!(outcome.passes > 0);
    assert_eq!(outcome.std_devs.len(), outcome.passes + 1);
    assert_eq!(outcome.std_devs[0], before);
    for pair in outcome.std_devs.windows(2)
    {
        assert!(pair[1] < pair[0], "{:?}", outcome.std_devs);
    }

    /* Trading dealer2 for dealer4 splits the 34 dealer units 17/17 */
    assert!(outcome.final_std_dev() < 1e-9, "{:?}", partition.scores(&roster, &config.scoring));

    let again = optimizer::optimize(&roster, &config, &mut partition);
    assert_eq!(again.passes, 0);
    assert!(again.converged);
    assert_eq!(again.final_std_dev(), outcome.final_std_dev());
}

#[test]
fn test_optimizer_pass_cap_is_reported()
{
    let mut config = PartyConfig::default();
    config.max_passes = 1;
    let roster = Roster::new(vec!(
        member("a", "buffer1", Role::Buffer, 900_000_000.0),
        member("b", "dealer1", Role::Dealer, 90_000_000.0),
        member("c", "dealer2", Role::Dealer, 80_000_000.0),
        member("d", "dealer3", Role::Dealer, 70_000_000.0),
        member("e", "buffer2", Role::Buffer, 900_000_000.0),
        member("f", "dealer4", Role::Dealer, 10_000_000.0),
        member("g", "dealer5", Role::Dealer, 20_000_000.0),
        member("h", "dealer6", Role::Dealer, 30_000_000.0),
        member("i", "buffer3", Role::Buffer, 900_000_000.0),
        member("j", "dealer7", Role::Dealer, 10_000_000.0),
        member("k", "dealer8", Role::Dealer, 10_000_000.0),
        member("l", "dealer9", Role::Dealer, 10_000_000.0),
    )).unwrap();

    let mut partition = Partition::new(
        vec!(group(&roster, &config, &[0, 1, 2, 3]), group(&roster, &config, &[4, 5, 6, 7]), group(&roster, &config, &[8, 9, 10, 11])),
        Vec::new());

    let outcome = optimizer::optimize(&roster, &config, &mut partition);

    assert_eq!(outcome.passes, 1);
    assert!(!outcome.converged);
    assert!(outcome.std_devs[1] < outcome.std_devs[0]);
}

#[test]
fn test_generated_rosters_keep_every_rule()
{
    let _ = env_logger::try_init();
    let config = PartyConfig::default();

    for seed in 1..12
    {
        let roster = generated_roster(20 + (seed as usize) * 7, 3 + (seed as usize) % 9, seed);
        let mut assignment = party::assign(&roster, &config);

        assignment.partition.verify(&roster, &config.rules).unwrap();
        assert_eq!(assignment.scores.len(), assignment.partition.groups.len());
        assert_eq!(assignment.partition.groups.len(), builder::party_count(&roster, config.rules.party_size));

        for pair in assignment.optimization.std_devs.windows(2)
        {
            assert!(pair[1] < pair[0], "seed {}: {:?}", seed, assignment.optimization.std_devs);
        }

        if assignment.optimization.converged
        {
            let again = optimizer::optimize(&roster, &config, &mut assignment.partition);
            assert_eq!(again.passes, 0, "seed {}", seed);
            assert_eq!(again.final_std_dev(), assignment.std_dev);
        }
    }
}
