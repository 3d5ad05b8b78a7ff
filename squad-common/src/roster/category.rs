use ::errors::*;

use std::fmt;
use std::str::FromStr;

/// The content a run is being built for. Each one is an independent roster filter.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category
{
    Nightmare,
    Temple,
    Azure,
    Venus,
    /// Hand-picked only, never set by `auto_place`
    Tmp,
}

impl Category
{
    pub fn all() -> Vec<Category>
    {
        vec!(Category::Nightmare, Category::Temple, Category::Azure, Category::Venus, Category::Tmp)
    }

    pub fn as_str(&self) -> &'static str
    {
        match self
        {
            Category::Nightmare => "nightmare",
            Category::Temple => "temple",
            Category::Azure => "azure",
            Category::Venus => "venus",
            Category::Tmp => "tmp",
        }
    }

    /// Parses `all` or a comma separated list such as `temple,venus`
    pub fn parse_list(raw: &str) -> Result<Vec<Category>>
    {
        if raw.trim().eq_ignore_ascii_case("all")
        {
            return Ok(Category::all());
        }

        let mut categories = Vec::new();
        for tag in raw.split(',').map(|tag| tag.trim()).filter(|tag| !tag.is_empty())
        {
            let category = tag.parse::<Category>()?;
            if !categories.contains(&category)
            {
                categories.push(category);
            }
        }

        Ok(categories)
    }
}

impl FromStr for Category
{
    type Err = Error;

    fn from_str(raw: &str) -> Result<Category>
    {
        match raw.trim().to_lowercase().as_str()
        {
            "nightmare" => Ok(Category::Nightmare),
            "temple" => Ok(Category::Temple),
            "azure" => Ok(Category::Azure),
            "venus" => Ok(Category::Venus),
            "tmp" => Ok(Category::Tmp),
            _ => bail!(ErrorKind::UnknownCategory(raw.to_string())),
        }
    }
}

impl fmt::Display for Category
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "{}", self.as_str())
    }
}
