/// The players at the top and bottom of one session.
///
/// # Fields
///
/// * `up_most` - Every nickname sharing the maximum amount.
/// * `down_most` - Every nickname sharing the minimum amount.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionExtremes {
    pub up_most: Vec<String>,
    pub down_most: Vec<String>,
}

impl SessionExtremes {
    pub fn is_up_most(&self, nickname: &str) -> bool {
        self.up_most.iter().any(|name| name == nickname)
    }

    pub fn is_down_most(&self, nickname: &str) -> bool {
        self.down_most.iter().any(|name| name == nickname)
    }
}

/// Finds the nicknames at the maximum and at the minimum amount in a single pass.
///
/// Ties are kept in iteration order; a strictly better amount restarts the list.
/// A single entry is both the maximum and the minimum; no entries yield two empty lists.
pub fn find_extremes<'a, I>(amounts: I) -> SessionExtremes
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut extremes = SessionExtremes::default();
    let mut max_amount = f64::NEG_INFINITY;
    let mut min_amount = f64::INFINITY;

    for (nickname, amount) in amounts {
        if amount == max_amount {
            extremes.up_most.push(nickname.to_owned());
        } else if amount > max_amount {
            extremes.up_most = vec![nickname.to_owned()];
            max_amount = amount;
        }

        if amount == min_amount {
            extremes.down_most.push(nickname.to_owned());
        } else if amount < min_amount {
            extremes.down_most = vec![nickname.to_owned()];
            min_amount = amount;
        }
    }

    extremes
}
