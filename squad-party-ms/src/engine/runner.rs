use engine::registry::RunRegistry;

use squad_common::api::CategoryResult;
use squad_common::config::PartyConfig;
use squad_common::errors::*;
use squad_common::party;
use squad_common::roster::{Category, Roster, RosterEntry};

use std::sync::{Arc, Mutex};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Builds the parties for one category while holding that category's run
pub fn run_category(registry: &RunRegistry, entries: &[RosterEntry], category: Category, config: &PartyConfig) -> Result<CategoryResult>
{
    config.validate()?;

    let _guard = registry.acquire(category.as_str())?;

    let roster = Roster::for_category(entries, category)?;
    info!("Building {} parties from {} members ({} buffers)", category, roster.len(), roster.buffer_ids().len());

    let assignment = party::assign(&roster, config);
    assignment.partition.verify(&roster, &config.rules)?;

    info!("Built {} {} parties, {} leftover, range: {:.2}, std dev: {:.2}, passes: {}",
          assignment.partition.groups.len(),
          category,
          assignment.partition.leftover.len(),
          assignment.range,
          assignment.std_dev,
          assignment.optimization.passes);

    Ok(CategoryResult::from_assignment(category, &roster, &assignment))
}

/// Runs independent categories on a fixed pool of `workers` threads.
///
/// All workers read the same snapshot, nothing mutable is shared between them. One category failing does not
/// stop the others.
///
/// # Return
/// * a result per requested category, in request order
pub fn run_categories(registry: Arc<RunRegistry>, entries: Arc<Vec<RosterEntry>>, categories: &[Category], config: Arc<PartyConfig>, workers: usize) -> Vec<(Category, Result<CategoryResult>)>
{
    let (job_sender, job_receiver) = channel::<(usize, Category)>();
    let (result_sender, result_receiver) = channel::<(usize, Result<CategoryResult>)>();
    let job_receiver = Arc::new(Mutex::new(job_receiver));

    for job in categories.iter().cloned().enumerate()
    {
        if let Err(error) = job_sender.send(job)
        {
            error!("Failed to queue {:?} because {}", job, error);
        }
    }
    drop(job_sender);

    let workers = workers.max(1).min(categories.len().max(1));
    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers
    {
        let registry = registry.clone();
        let entries = entries.clone();
        let config = config.clone();
        let jobs = job_receiver.clone();
        let results = result_sender.clone();

        handles.push(thread::spawn(move || {
            while let Some((index, category)) = next_job(&jobs)
            {
                debug!("Worker {} picked up {}", worker, category);

                let result = run_category(&registry, &entries, category, &config);
                if let Err(error) = results.send((index, result))
                {
                    error!("Worker {} failed to hand back {} because {}", worker, category, error);
                }
            }
        }));
    }
    drop(result_sender);

    let mut collected: Vec<Option<Result<CategoryResult>>> = categories.iter().map(|_| None).collect();
    for (index, result) in result_receiver.iter()
    {
        collected[index] = Some(result);
    }

    for handle in handles
    {
        if handle.join().is_err()
        {
            error!("A party worker panicked");
        }
    }

    categories.iter()
        .cloned()
        .zip(collected.into_iter())
        .map(|(category, result)| {
            let result = result.unwrap_or_else(|| Err(format!("No result was produced for {}", category).into()));
            (category, result)
        })
        .collect()
}

fn next_job(jobs: &Mutex<Receiver<(usize, Category)>>) -> Option<(usize, Category)>
{
    match jobs.lock()
    {
        Ok(receiver) => receiver.recv().ok(),
        Err(error) =>
        {
            error!("Failed to acquire job queue because {}", error);
            None
        },
    }
}
