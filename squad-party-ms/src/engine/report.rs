use squad_common::api::{CategoryResult, Slot};
use squad_common::roster::Role;

use std::fmt;

struct Describe<'a>(&'a Slot);

impl<'a> fmt::Display for Describe<'a>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        let slot = self.0;
        write!(f, "{} - {} ({:.0}", slot.account, slot.name, slot.power)?;
        if let Some(fame) = slot.fame
        {
            write!(f, ", fame {}", fame)?;
        }
        write!(f, ")")
    }
}

/// Human readable summary of one category, printed after every run
pub struct Report<'a>(pub &'a CategoryResult);

impl<'a> fmt::Display for Report<'a>
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        let result = self.0;

        let placed: usize = result.parties.iter().map(|party| party.members().len()).sum();
        writeln!(f, "=== {} ({}) ===", result.category, result.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Placed: {}, leftover: {}, parties: {}\n", placed, result.leftover.len(), result.parties.len())?;

        for party in result.parties.iter()
        {
            match party.buffer
            {
                Some(ref buffer) => writeln!(f, "Party {}: Buffer: {}", party.party, Describe(buffer))?,
                None => writeln!(f, "Party {}: Buffer: <none>", party.party)?,
            }

            for (index, slot) in vec!(&party.slot1, &party.slot2, &party.slot3).into_iter().enumerate()
            {
                match *slot
                {
                    Some(ref slot) if slot.role == Role::Buffer => writeln!(f, "  Slot{} (sub buffer): {}", index + 1, Describe(slot))?,
                    Some(ref slot) => writeln!(f, "  Slot{}: {}", index + 1, Describe(slot))?,
                    None => writeln!(f, "  Slot{}: <empty>", index + 1)?,
                }
            }

            writeln!(f, "  Combined: {:.2}\n", party.score)?;
        }

        writeln!(f, "Range: {:.2}, std dev: {:.2}, optimizer passes: {} ({})",
                 result.range,
                 result.std_dev,
                 result.passes,
                 if result.converged { "converged" } else { "stopped at cap" })?;

        writeln!(f, "=== Leftover ===")?;
        for row in result.leftover.iter()
        {
            writeln!(f, "[{}] {}", row.member.role, Describe(&row.member))?;
        }
        writeln!(f, "{} left over", result.leftover.len())?;

        for warning in result.warnings.iter()
        {
            writeln!(f, "Warning: {:?}", warning)?;
        }

        Ok(())
    }
}

pub fn format_report(result: &CategoryResult) -> String
{
    Report(result).to_string()
}
