use crate::models::Price;

pub const PRICE_ON_APPLICATION: &str = "Price on application";

/// Shortest decimal form: `40.0` prints as `40`, `32.5` as `32.5`
pub fn number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{value}")
}

/// Whole-dollar AUD amount, e.g. `$1,250,000`
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return PRICE_ON_APPLICATION.to_string();
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn price(price: Option<&Price>) -> String {
    match price {
        Some(Price::Amount(amount)) => currency(*amount),
        Some(Price::Text(text)) => text.clone(),
        None => PRICE_ON_APPLICATION.to_string(),
    }
}

/// `1 bed`, `3 beds`, `0 beds`
pub fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Upper-cases the first letter of every space-separated word and lower-cases the rest
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
