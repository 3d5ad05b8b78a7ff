use ::errors::*;

use roster::category::Category;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Index of a member inside the `Roster` snapshot it was taken from
pub type MemberId = usize;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role
{
    Buffer,
    Dealer,
}

impl FromStr for Role
{
    type Err = Error;

    /// Accepts the names as well as the `isbuffer` flag the characters table stores (`1`/`0`)
    fn from_str(raw: &str) -> Result<Role>
    {
        match raw.trim().to_lowercase().as_str()
        {
            "buffer" | "1" => Ok(Role::Buffer),
            "dealer" | "0" => Ok(Role::Dealer),
            _ => bail!(ErrorKind::UnknownRole(raw.to_string())),
        }
    }
}

impl fmt::Display for Role
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self
        {
            Role::Buffer => write!(f, "buffer"),
            Role::Dealer => write!(f, "dealer"),
        }
    }
}

/// One character row as the roster collaborator hands it over.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RosterEntry
{
    pub account: String,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub fame: Option<u32>,
    pub score: f64,
    pub role: String,
    #[serde(default)]
    pub categories: BTreeSet<Category>,
    /// Characters switched off by their owner take part in no run
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool
{
    true
}

impl RosterEntry
{
    pub fn new<S1, S2, S3>(account: S1, name: S2, role: S3, score: f64) -> RosterEntry
        where S1: Into<String>, S2: Into<String>, S3: Into<String>
    {
        RosterEntry {
            account: account.into(),
            name: name.into(),
            job: None,
            fame: None,
            score,
            role: role.into(),
            categories: BTreeSet::new(),
            active: true,
        }
    }

    pub fn to_member(&self) -> Result<Member>
    {
        let role = self.role.parse::<Role>()
            .map_err(|_| ErrorKind::InvalidMember(self.account.clone(), self.name.clone(), format!("unknown role tag '{}'", self.role)))?;

        Ok(Member::new(self.account.clone(), self.name.clone(), self.job.clone(), self.fame, role, self.score))
    }
}

/// Immutable character record. Which party holds it is tracked by `MemberId`s, never on the member.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct Member
{
    pub account: String,
    pub name: String,
    pub job: Option<String>,
    #[serde(default)]
    pub fame: Option<u32>,
    pub role: Role,
    pub power: f64,
}

impl Member
{
    pub fn is_buffer(&self) -> bool
    {
        self.role == Role::Buffer
    }

    fn check(&self) -> Result<()>
    {
        let reason = if self.account.trim().is_empty()
        {
            Some("empty account")
        } else if self.name.trim().is_empty()
        {
            Some("empty name")
        } else if !self.power.is_finite()
        {
            Some("power is not a finite number")
        } else if self.power < 0.0
        {
            Some("power is negative")
        } else
        {
            None
        };

        match reason
        {
            Some(reason) => bail!(ErrorKind::InvalidMember(self.account.clone(), self.name.clone(), reason.to_string())),
            None => Ok(()),
        }
    }
}

/// Rejects a snapshot that the party builder must never see
pub fn validate(entries: &[RosterEntry]) -> Result<()>
{
    let members = entries.iter()
        .map(|entry| entry.to_member())
        .collect::<Result<Vec<Member>>>()?;

    check_members(&members)
}

fn check_members(members: &[Member]) -> Result<()>
{
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(members.len());

    for member in members.iter()
    {
        member.check()?;

        if !seen.insert((member.account.as_str(), member.name.as_str()))
        {
            bail!(ErrorKind::InvalidMember(member.account.clone(), member.name.clone(), "listed more than once".to_string()));
        }
    }

    Ok(())
}

/// The snapshot one run works on. Members are only ever referred to by their index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster
{
    members: Vec<Member>,
}

impl Roster
{
    pub fn new(members: Vec<Member>) -> Result<Roster>
    {
        check_members(&members)?;

        Ok(Roster { members })
    }

    /// Every active entry, in input order
    pub fn from_entries(entries: &[RosterEntry]) -> Result<Roster>
    {
        validate(entries)?;

        let members = entries.iter()
            .filter(|entry| entry.active)
            .map(|entry| entry.to_member())
            .collect::<Result<Vec<Member>>>()?;

        Roster::new(members)
    }

    /// Active entries flagged for `category`, in input order.
    ///
    /// The whole snapshot is validated first so a bad row is reported even if it would have been filtered out.
    pub fn for_category(entries: &[RosterEntry], category: Category) -> Result<Roster>
    {
        validate(entries)?;

        let members = entries.iter()
            .filter(|entry| entry.active && entry.categories.contains(&category))
            .map(|entry| entry.to_member())
            .collect::<Result<Vec<Member>>>()?;

        debug!("Roster for {}: {} of {} entries", category, members.len(), entries.len());

        Roster::new(members)
    }

    pub fn len(&self) -> usize
    {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.members.is_empty()
    }

    pub fn member(&self, id: MemberId) -> &Member
    {
        &self.members[id]
    }

    pub fn members(&self) -> &[Member]
    {
        &self.members
    }

    pub fn ids(&self) -> ::std::ops::Range<MemberId>
    {
        0..self.members.len()
    }

    pub fn buffer_ids(&self) -> Vec<MemberId>
    {
        self.ids().filter(|&id| self.members[id].is_buffer()).collect()
    }

    pub fn dealer_ids(&self) -> Vec<MemberId>
    {
        self.ids().filter(|&id| !self.members[id].is_buffer()).collect()
    }

    /// Number of characters each account brought to this run
    pub fn account_sizes(&self) -> HashMap<&str, usize>
    {
        let mut sizes = HashMap::new();
        for member in self.members.iter()
        {
            *sizes.entry(member.account.as_str()).or_insert(0) += 1;
        }

        sizes
    }
}
