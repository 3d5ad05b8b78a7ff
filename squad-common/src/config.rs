//! Tunable numbers for scoring, party composition and eligibility tiers.
//!
//! The defaults are the values the guild has been running with. They are tuned for one game's
//! scoring meta, so treat them as configuration rather than something the algorithm depends on.

use ::errors::*;

/// Parties are emitted as a buffer column plus three slots
pub const ROW_PARTY_SIZE: usize = 4;

/// Normalization constants used by `party::score`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoreWeights
{
    /// Main buffer power is divided by this to become the party multiplier
    pub buff_norm: f64,
    /// Each dealer contributes `floor(power / dealer_unit)`
    pub dealer_unit: f64,
    pub sub_buff_norm: f64,
    pub sub_buff_weight: f64,
}

impl Default for ScoreWeights
{
    fn default() -> ScoreWeights
    {
        ScoreWeights {
            buff_norm: 3_000_000.0,
            dealer_unit: 10_000_000.0,
            sub_buff_norm: 1_000_000.0,
            sub_buff_weight: 0.08,
        }
    }
}

/// Hard limits every party has to respect.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PartyRules
{
    pub party_size: usize,
    pub min_buffers: usize,
    pub max_buffers: usize,
}

impl ScoreWeights
{
    pub fn validate(&self) -> Result<()>
    {
        let norms = [
            ("buff_norm", self.buff_norm),
            ("dealer_unit", self.dealer_unit),
            ("sub_buff_norm", self.sub_buff_norm),
        ];

        for &(name, value) in norms.iter()
        {
            if !value.is_finite() || value <= 0.0
            {
                bail!(ErrorKind::InvalidConfig(format!("{} must be a positive number, got {}", name, value)));
            }
        }

        if !self.sub_buff_weight.is_finite()
        {
            bail!(ErrorKind::InvalidConfig(format!("sub_buff_weight must be finite, got {}", self.sub_buff_weight)));
        }

        Ok(())
    }
}

impl Default for PartyRules
{
    fn default() -> PartyRules
    {
        PartyRules {
            party_size: 4,
            min_buffers: 1,
            max_buffers: 2,
        }
    }
}

/// Fame cut-offs used to flag which categories a character can be brought to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TierThresholds
{
    pub nightmare: u32,
    /// Only this many characters per account are flagged for nightmare
    pub nightmare_per_account: usize,
    pub temple: u32,
    pub azure: u32,
    pub venus: u32,
}

impl PartyRules
{
    /// Every party keeps at least one buffer and room for a dealer, and fits one output row
    pub fn validate(&self) -> Result<()>
    {
        if self.party_size != ROW_PARTY_SIZE
        {
            bail!(ErrorKind::InvalidConfig(format!("party_size must be {}, got {}", ROW_PARTY_SIZE, self.party_size)));
        }

        if self.min_buffers < 1 || self.min_buffers > self.max_buffers || self.max_buffers >= self.party_size
        {
            bail!(ErrorKind::InvalidConfig(format!("buffers must satisfy 1 <= min ({}) <= max ({}) < party_size ({})",
                                                   self.min_buffers, self.max_buffers, self.party_size)));
        }

        Ok(())
    }
}

impl Default for TierThresholds
{
    fn default() -> TierThresholds
    {
        TierThresholds {
            nightmare: 52925,
            nightmare_per_account: 4,
            temple: 48988,
            azure: 44929,
            venus: 41929,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PartyConfig
{
    pub scoring: ScoreWeights,
    pub rules: PartyRules,
    /// Upper bound on optimizer passes, each pass applies at most one swap
    pub max_passes: usize,
    pub tiers: TierThresholds,
}

impl PartyConfig
{
    /// Rejects settings the party algorithms or the output rows cannot handle
    pub fn validate(&self) -> Result<()>
    {
        self.scoring.validate()?;
        self.rules.validate()?;

        Ok(())
    }
}

impl Default for PartyConfig
{
    fn default() -> PartyConfig
    {
        PartyConfig {
            scoring: ScoreWeights::default(),
            rules: PartyRules::default(),
            max_passes: 1000,
            tiers: TierThresholds::default(),
        }
    }
}
