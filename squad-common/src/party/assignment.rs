use config::PartyConfig;
use party::builder;
use party::optimizer::{self, OptimizeOutcome};
use party::partition::Partition;
use party::reconciler;
use party::score;
use roster::Roster;

/// Something that made the result worse than it could be. Never an error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Warning
{
    /// No buffer in the roster, so no party at all
    InsufficientBuffers,
    /// Fewer members than a single party needs
    InsufficientMembers { members: usize },
    /// Some parties could not be filled up
    InsufficientDealers { incomplete_parties: usize },
    /// The optimizer stopped at its pass cap
    NonConvergence { passes: usize, std_dev: f64 },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Assignment
{
    pub partition: Partition,
    pub scores: Vec<f64>,
    pub range: f64,
    pub std_dev: f64,
    pub warnings: Vec<Warning>,
    pub optimization: OptimizeOutcome,
}

/// Build, reconcile leftovers, then balance
pub fn assign(roster: &Roster, config: &PartyConfig) -> Assignment
{
    let partition = builder::build(roster, config);
    debug!("Built {} parties, {} leftover", partition.groups.len(), partition.leftover.len());

    let mut partition = reconciler::reconcile(roster, &config.rules, partition);
    debug!("After reconciling {} leftover", partition.leftover.len());

    let optimization = optimizer::optimize(roster, config, &mut partition);

    let scores = partition.scores(roster, &config.scoring);
    let warnings = collect_warnings(roster, config, &partition, &optimization);
    for warning in warnings.iter()
    {
        warn!("Party assignment: {:?}", warning);
    }

    Assignment {
        range: score::range(&scores),
        std_dev: score::std_dev(&scores),
        scores,
        warnings,
        optimization,
        partition,
    }
}

fn collect_warnings(roster: &Roster, config: &PartyConfig, partition: &Partition, optimization: &OptimizeOutcome) -> Vec<Warning>
{
    let mut warnings = Vec::new();

    if roster.buffer_ids().is_empty()
    {
        warnings.push(Warning::InsufficientBuffers);
    } else if roster.len() < config.rules.party_size
    {
        warnings.push(Warning::InsufficientMembers { members: roster.len() });
    }

    let incomplete_parties = partition.groups.len() - partition.complete_count(roster, &config.rules);
    if incomplete_parties > 0
    {
        warnings.push(Warning::InsufficientDealers { incomplete_parties });
    }

    if !optimization.converged
    {
        warnings.push(Warning::NonConvergence { passes: optimization.passes, std_dev: optimization.final_std_dev() });
    }

    warnings
}
