use ::errors::*;

use config::TierThresholds;
use roster::category::Category;
use roster::model::{Role, RosterEntry};

use std::collections::{BTreeMap, HashMap};

/// Recomputes the automatic category flags of every entry from its fame.
///
/// Per account, characters are ranked by fame. Only the best `nightmare_per_account` above the nightmare
/// cut-off are flagged for nightmare and those are kept out of azure. `tmp` is never touched, and neither
/// is an entry without a fame value.
///
/// # Return
/// * how many entries had their flags recomputed
pub fn auto_place(entries: &mut [RosterEntry], thresholds: &TierThresholds) -> usize
{
    let mut by_account: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, entry) in entries.iter().enumerate()
    {
        if entry.fame.is_some()
        {
            by_account.entry(entry.account.clone()).or_insert_with(Vec::new).push(index);
        }
    }

    let mut placed = 0;
    for (account, mut indices) in by_account.into_iter()
    {
        /* Stable sort so equal fame keeps input order */
        indices.sort_by(|&a, &b| entries[b].fame.cmp(&entries[a].fame));

        let nightmare: Vec<usize> = indices.iter()
            .cloned()
            .filter(|&index| entries[index].fame.unwrap_or(0) >= thresholds.nightmare)
            .take(thresholds.nightmare_per_account)
            .collect();

        for &index in indices.iter()
        {
            let fame = entries[index].fame.unwrap_or(0);
            let in_nightmare = nightmare.contains(&index);

            let flags = [
                (Category::Nightmare, in_nightmare),
                (Category::Temple, fame >= thresholds.temple),
                (Category::Azure, fame >= thresholds.azure && !in_nightmare),
                (Category::Venus, fame >= thresholds.venus),
            ];

            let categories = &mut entries[index].categories;
            for &(category, eligible) in flags.iter()
            {
                if eligible
                {
                    categories.insert(category);
                } else
                {
                    categories.remove(&category);
                }
            }

            trace!("Placed {}/{} (fame {}) into {:?}", account, entries[index].name, fame, entries[index].categories);
            placed += 1;
        }

        debug!("Auto placed {} characters for account: {}", indices.len(), account);
    }

    placed
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, new)]
pub struct CategoryCount
{
    pub total: usize,
    pub dealers: usize,
    pub buffers: usize,
}

/// How many active characters an account has flagged for each category, split by role
pub fn category_summary(entries: &[RosterEntry], account: &str) -> Result<BTreeMap<Category, CategoryCount>>
{
    let mut summary: BTreeMap<Category, CategoryCount> = Category::all()
        .into_iter()
        .map(|category| (category, CategoryCount::default()))
        .collect();

    for entry in entries.iter().filter(|entry| entry.active && entry.account == account)
    {
        let role = entry.to_member()?.role;

        for category in entry.categories.iter()
        {
            let count = summary.entry(*category).or_insert_with(CategoryCount::default);
            count.total += 1;
            match role
            {
                Role::Buffer => count.buffers += 1,
                Role::Dealer => count.dealers += 1,
            }
        }
    }

    Ok(summary)
}
