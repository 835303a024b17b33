use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinKind {
    Token,
    Coin,
}

impl CoinKind {
    pub fn label(self) -> &'static str {
        match self {
            CoinKind::Token => "token",
            CoinKind::Coin => "coin",
        }
    }
}

/// One coin as delivered by the coin endpoint.
///
/// Records are never edited after decoding; filtering always builds new
/// vectors of clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub name: String,
    pub symbol: String,
    pub is_new: bool,
    pub is_active: bool,
    #[serde(rename = "type")]
    pub kind: CoinKind,
}

impl CoinRecord {
    pub fn new(name: &str, symbol: &str, is_active: bool, is_new: bool, kind: CoinKind) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            is_new,
            is_active,
            kind,
        }
    }

    pub fn icon(&self) -> CoinIcon {
        match (self.is_active, self.kind) {
            (false, _) => CoinIcon::Inactive,
            (true, CoinKind::Token) => CoinIcon::TokenActive,
            (true, CoinKind::Coin) => CoinIcon::CoinActive,
        }
    }

    /// Case-insensitive substring match on name or symbol. Empty query matches.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.symbol.to_lowercase().contains(&needle)
    }
}

pub const NEW_BADGE_ASSET: &str = "new_crypto";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinIcon {
    Inactive,
    TokenActive,
    CoinActive,
}

impl CoinIcon {
    pub fn asset_name(self) -> &'static str {
        match self {
            CoinIcon::Inactive => "crypto_inactive",
            CoinIcon::TokenActive => "crypto_type_token_active",
            CoinIcon::CoinActive => "crypto_type_coin_active",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            CoinIcon::Inactive => "\u{25cc}",    // dotted circle
            CoinIcon::TokenActive => "\u{25c6}", // diamond
            CoinIcon::CoinActive => "\u{25cf}",  // disc
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKind {
    Active,
    Inactive,
    TokenOnly,
    CoinOnly,
    New,
}

pub const FILTER_KINDS: [FilterKind; 5] = [
    FilterKind::Active,
    FilterKind::Inactive,
    FilterKind::TokenOnly,
    FilterKind::CoinOnly,
    FilterKind::New,
];

impl FilterKind {
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Active => "Active Coins",
            FilterKind::Inactive => "Inactive Coins",
            FilterKind::TokenOnly => "Only Tokens",
            FilterKind::CoinOnly => "Only Coins",
            FilterKind::New => "New Coins",
        }
    }

    pub fn matches(self, coin: &CoinRecord) -> bool {
        match self {
            FilterKind::Active => coin.is_active,
            FilterKind::Inactive => !coin.is_active,
            FilterKind::TokenOnly => coin.kind == CoinKind::Token,
            FilterKind::CoinOnly => coin.kind == CoinKind::Coin,
            FilterKind::New => coin.is_new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_record() {
        let json = r#"{"name":"Aave","symbol":"AAVE","is_new":true,"is_active":true,"type":"token"}"#;
        let coin: CoinRecord = serde_json::from_str(json).unwrap();
        assert_eq!(coin, CoinRecord::new("Aave", "AAVE", true, true, CoinKind::Token));
    }

    #[test]
    fn rejects_unknown_type_and_missing_fields() {
        let bad_type = r#"{"name":"X","symbol":"X","is_new":false,"is_active":true,"type":"nft"}"#;
        assert!(serde_json::from_str::<CoinRecord>(bad_type).is_err());

        let missing = r#"{"name":"X","symbol":"X","is_active":true,"type":"coin"}"#;
        assert!(serde_json::from_str::<CoinRecord>(missing).is_err());
    }

    #[test]
    fn one_bad_record_fails_the_whole_payload() {
        let json = r#"[
            {"name":"Bitcoin","symbol":"BTC","is_new":false,"is_active":true,"type":"coin"},
            {"name":"Broken","symbol":"BRK","is_new":false,"is_active":true,"type":"stock"}
        ]"#;
        assert!(serde_json::from_str::<Vec<CoinRecord>>(json).is_err());
    }

    #[test]
    fn icon_depends_on_activity_then_kind() {
        let inactive_token = CoinRecord::new("A", "A", false, false, CoinKind::Token);
        let inactive_coin = CoinRecord::new("B", "B", false, true, CoinKind::Coin);
        assert_eq!(inactive_token.icon(), CoinIcon::Inactive);
        assert_eq!(inactive_coin.icon(), CoinIcon::Inactive);

        let token = CoinRecord::new("C", "C", true, false, CoinKind::Token);
        let coin = CoinRecord::new("D", "D", true, false, CoinKind::Coin);
        assert_eq!(token.icon().asset_name(), "crypto_type_token_active");
        assert_eq!(coin.icon().asset_name(), "crypto_type_coin_active");
    }

    #[test]
    fn query_matches_name_or_symbol_ignoring_case() {
        let btc = CoinRecord::new("Bitcoin", "BTC", true, false, CoinKind::Coin);
        assert!(btc.matches_query("bit"));
        assert!(btc.matches_query("BIT"));
        assert!(btc.matches_query("tc"));
        assert!(btc.matches_query(""));
        assert!(!btc.matches_query("eth"));
    }

    #[test]
    fn filter_labels_follow_declaration_order() {
        let labels: Vec<&str> = FILTER_KINDS.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            ["Active Coins", "Inactive Coins", "Only Tokens", "Only Coins", "New Coins"]
        );
    }
}
