use dalal_core::SymbolInfo;

fn info(symbol: &str, name: &str, sector: &str, industry: &str) -> SymbolInfo {
    SymbolInfo {
        symbol: Some(format!("{symbol}.NS")),
        short_name: Some(name.to_string()),
        long_name: Some(name.to_string()),
        sector: Some(sector.to_string()),
        industry: Some(industry.to_string()),
        currency: Some("INR".to_string()),
        ..SymbolInfo::default()
    }
}

pub fn by_symbol(s: &str) -> Option<SymbolInfo> {
    match s {
        "RELIANCE" => Some(SymbolInfo {
            market_cap: Some(16_900_000_000_000),
            trailing_pe: Some(27.4),
            beta: Some(0.61),
            ..info(s, "Reliance Industries Limited", "Energy", "Oil & Gas Refining & Marketing")
        }),
        "TCS" => Some(info(s, "Tata Consultancy Services Limited", "Technology", "Information Technology Services")),
        "INFY" => Some(info(s, "Infosys Limited", "Technology", "Information Technology Services")),
        "M&M" => Some(info(s, "Mahindra & Mahindra Limited", "Consumer Cyclical", "Auto Manufacturers")),
        _ => None,
    }
}
