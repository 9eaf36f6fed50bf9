use dalal_core::NewsItem;

pub fn by_symbol(s: &str) -> Option<Vec<NewsItem>> {
    let item = |title: &str, slug: &str, date: &str| NewsItem {
        title: title.to_string(),
        link: format!("https://www.moneycontrol.com/news/business/{slug}.html"),
        date: date.to_string(),
    };
    match s {
        "RELIANCE" => Some(vec![
            item("Reliance Q3 profit rises on retail strength", "reliance-q3", "January 19, 2024 08:12 PM IST"),
            item("Jio adds subscribers in December", "jio-december", "January 17, 2024 11:40 AM IST"),
            item("Reliance Retail opens 500 stores", "reliance-retail", "January 12, 2024 06:05 PM IST"),
        ]),
        "TCS" => Some(vec![item("TCS wins large European deal", "tcs-deal", "January 10, 2024 09:30 AM IST")]),
        _ => None,
    }
}
