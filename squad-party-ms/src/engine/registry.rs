use squad_common::errors::*;

use std::collections::HashSet;
use std::sync::Mutex;

/// Keeps at most one run in flight per roster key.
///
/// Runs for different keys never touch each other's state and can go ahead in parallel.
#[derive(Debug, Default)]
pub struct RunRegistry
{
    in_flight: Mutex<HashSet<String>>,
}

/// Releases its key when dropped
#[derive(Debug)]
pub struct RunGuard<'a>
{
    registry: &'a RunRegistry,
    key: String,
}

impl RunRegistry
{
    pub fn new() -> RunRegistry
    {
        RunRegistry::default()
    }

    pub fn acquire<S>(&self, key: S) -> Result<RunGuard>
        where S: Into<String>
    {
        let key = key.into();

        match self.in_flight.lock()
        {
            Ok(mut in_flight) =>
            {
                if !in_flight.insert(key.clone())
                {
                    bail!(ErrorKind::RunInProgress(key));
                }
            },
            Err(error) => bail!("Failed to acquire lock because {}", error),
        }

        trace!("Acquired run for key: {}", key);
        Ok(RunGuard { registry: self, key })
    }

    pub fn is_running(&self, key: &str) -> bool
    {
        match self.in_flight.lock()
        {
            Ok(in_flight) => in_flight.contains(key),
            Err(_) => false,
        }
    }
}

impl<'a> RunGuard<'a>
{
    pub fn key(&self) -> &str
    {
        &self.key
    }
}

impl<'a> Drop for RunGuard<'a>
{
    fn drop(&mut self)
    {
        match self.registry.in_flight.lock()
        {
            Ok(mut in_flight) =>
            {
                in_flight.remove(&self.key);
                trace!("Released run for key: {}", self.key);
            },
            Err(error) => error!("Failed to release run for key: {} because {}", self.key, error),
        }
    }
}
