use config::PartyConfig;
use party::constraint;
use party::group;
use party::partition::Partition;
use party::score;
use roster::{MemberId, Roster};

/// A swap has to lower the standard deviation by more than float noise to count as an improvement
const IMPROVEMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct OptimizeOutcome
{
    /// Passes that applied a swap
    pub passes: usize,
    /// Standard deviation before the first pass and after every applied swap, never increasing
    pub std_devs: Vec<f64>,
    /// False when the pass cap was hit before a pass found nothing to improve
    pub converged: bool,
}

impl OptimizeOutcome
{
    pub fn final_std_dev(&self) -> f64
    {
        self.std_devs.last().cloned().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Swap
{
    a: usize,
    member_a: MemberId,
    b: usize,
    member_b: MemberId,
    std_dev: f64,
}

/// Evens out party scores with best-improvement pairwise swaps.
///
/// Each pass tries every legal swap between two parties and applies the one giving the lowest standard
/// deviation, as long as it is strictly lower than the current one. Stops when a pass finds nothing or after
/// `max_passes`. The result is a local optimum only.
pub fn optimize(roster: &Roster, config: &PartyConfig, partition: &mut Partition) -> OptimizeOutcome
{
    let mut scores = partition.scores(roster, &config.scoring);
    let mut std_devs = vec!(score::std_dev(&scores));
    let mut passes = 0;
    let mut converged = false;

    while passes < config.max_passes
    {
        let current = std_devs.last().cloned().unwrap_or(0.0);

        let best = match best_swap(roster, config, partition, &scores, current)
        {
            None =>
            {
                converged = true;
                break;
            },
            Some(best) => best,
        };

        if let Err(error) = group::swap(&mut partition.groups, roster, &config.rules, best.a, best.member_a, best.b, best.member_b)
        {
            error!("Best swap was rejected on apply because {}", error);
            break;
        }

        scores[best.a] = partition.groups[best.a].score(roster, &config.scoring);
        scores[best.b] = partition.groups[best.b].score(roster, &config.scoring);

        let std_dev = score::std_dev(&scores);
        debug!("Pass {}: swapped {} (party {}) with {} (party {}), std dev {:.4} -> {:.4}", passes + 1, best.member_a, best.a, best.member_b, best.b, current, std_dev);

        std_devs.push(std_dev);
        passes += 1;
    }

    if !converged && passes >= config.max_passes
    {
        /* One more look so a cap that happens to land on the optimum is not reported as a failure */
        let current = std_devs.last().cloned().unwrap_or(0.0);
        converged = best_swap(roster, config, partition, &scores, current).is_none();
    }

    OptimizeOutcome::new(passes, std_devs, converged)
}

fn best_swap(roster: &Roster, config: &PartyConfig, partition: &Partition, scores: &[f64], current: f64) -> Option<Swap>
{
    let groups = &partition.groups;
    let mut trial = scores.to_vec();
    let mut best: Option<Swap> = None;

    for a in 0..groups.len()
    {
        for b in (a + 1)..groups.len()
        {
            for &member_a in groups[a].members()
            {
                for &member_b in groups[b].members()
                {
                    if !constraint::can_swap(roster, &config.rules, &groups[a], member_a, &groups[b], member_b)
                    {
                        continue;
                    }

                    trial[a] = groups[a].score_replacing(roster, &config.scoring, member_a, member_b);
                    trial[b] = groups[b].score_replacing(roster, &config.scoring, member_b, member_a);
                    let std_dev = score::std_dev(&trial);
                    trial[a] = scores[a];
                    trial[b] = scores[b];

                    let threshold = best.map_or(current - IMPROVEMENT_EPSILON, |best| best.std_dev);
                    if std_dev < threshold
                    {
                        best = Some(Swap { a, member_a, b, member_b, std_dev });
                    }
                }
            }
        }
    }

    best
}
