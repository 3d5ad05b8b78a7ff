use config::ScoreWeights;
use roster::Member;

/// Computes the party score of any set of up to four members.
///
/// `main buffer factor * dealer units * sub buffer factor`, where
/// * the main buffer is the strongest buffer, a party without one uses a factor of 1.0
/// * the sub buffer is the second strongest buffer, if there is one
/// * every dealer adds `floor(power / dealer_unit)` units
///
/// A party without dealers scores 0. The result does not depend on the order of `members`.
pub fn score<'a, I>(members: I, weights: &ScoreWeights) -> f64
    where I: IntoIterator<Item = &'a Member>
{
    let mut main_buffer: Option<f64> = None;
    let mut sub_buffer: Option<f64> = None;
    let mut dealer_units = 0.0;

    for member in members
    {
        if member.is_buffer()
        {
            match main_buffer
            {
                Some(main) if member.power > main =>
                {
                    sub_buffer = Some(main);
                    main_buffer = Some(member.power);
                },
                Some(_) =>
                {
                    if sub_buffer.map_or(true, |sub| member.power > sub)
                    {
                        sub_buffer = Some(member.power);
                    }
                },
                None => main_buffer = Some(member.power),
            }
        } else
        {
            dealer_units += dealer_units_of(member.power, weights);
        }
    }

    let buff_factor = main_buffer.map_or(1.0, |power| power / weights.buff_norm);
    let sub_buff_factor = sub_buffer.map_or(1.0, |power| 1.0 + (power / weights.sub_buff_norm) * weights.sub_buff_weight);

    buff_factor * dealer_units * sub_buff_factor
}

fn dealer_units_of(power: f64, weights: &ScoreWeights) -> f64
{
    (power / weights.dealer_unit).floor()
}

/// Population standard deviation, 0 for no scores
pub fn std_dev(scores: &[f64]) -> f64
{
    if scores.is_empty()
    {
        return 0.0;
    }

    let count = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / count;
    let variance = scores.iter()
        .map(|score| (score - mean) * (score - mean))
        .sum::<f64>() / count;

    variance.sqrt()
}

/// `max - min`, 0 for no scores
pub fn range(scores: &[f64]) -> f64
{
    let max = scores.iter().cloned().fold(None, |acc: Option<f64>, score| Some(acc.map_or(score, |acc| acc.max(score))));
    let min = scores.iter().cloned().fold(None, |acc: Option<f64>, score| Some(acc.map_or(score, |acc| acc.min(score))));

    match (max, min)
    {
        (Some(max), Some(min)) => max - min,
        _ => 0.0,
    }
}
