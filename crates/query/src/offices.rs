/// EU member states; an EUIPO mark is in force in each of them.
pub const EU_COUNTRIES: &[&str] = &[
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT", "LV",
    "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];

const OFFICE_NAMES: &[(&str, &str)] = &[
    ("WO", "WIPO"),
    ("EU", "EUIPO"),
    ("EM", "EUIPO"),
    ("DE", "DPMA"),
    ("US", "USPTO"),
    ("GB", "UKIPO"),
    ("UK", "UKIPO"),
    ("FR", "INPI"),
    ("ES", "OEPM"),
    ("IT", "UIBM"),
    ("CH", "IGE"),
    ("AT", "ÖPA"),
    ("TR", "TÜRKPATENT"),
    ("CN", "CNIPA"),
    ("JP", "JPO"),
    ("KR", "KIPO"),
    ("AU", "IP Australia"),
    ("CA", "CIPO"),
    ("BR", "INPI"),
    ("RU", "ROSPATENT"),
    ("IN", "CGPDTM"),
];

/// Country names (German and English) and legacy codes mapped to office codes.
const OFFICE_ALIASES: &[(&str, &str)] = &[
    ("DEUTSCHLAND", "DE"),
    ("GERMANY", "DE"),
    ("BRD", "DE"),
    ("EUROPA", "EU"),
    ("EM", "EU"),
    ("EUROPEAN UNION", "EU"),
    ("EUROPÄISCHE UNION", "EU"),
    ("EUIPO", "EU"),
    ("UK", "GB"),
    ("UNITED KINGDOM", "GB"),
    ("GROSSBRITANNIEN", "GB"),
    ("GREAT BRITAIN", "GB"),
    ("ENGLAND", "GB"),
    ("USA", "US"),
    ("UNITED STATES", "US"),
    ("VEREINIGTE STAATEN", "US"),
    ("SCHWEIZ", "CH"),
    ("SWITZERLAND", "CH"),
    ("ÖSTERREICH", "AT"),
    ("AUSTRIA", "AT"),
    ("FRANKREICH", "FR"),
    ("FRANCE", "FR"),
    ("ITALIEN", "IT"),
    ("ITALY", "IT"),
    ("SPANIEN", "ES"),
    ("SPAIN", "ES"),
    ("NIEDERLANDE", "NL"),
    ("NETHERLANDS", "NL"),
    ("CHINA", "CN"),
    ("JAPAN", "JP"),
    ("WIPO", "WO"),
    ("INTERNATIONAL", "WO"),
    ("WELTWEIT", "WO"),
];

/// Upper-case an office code and resolve country-name aliases.
pub fn normalize_office_code(input: &str) -> String {
    let code = input.trim().to_uppercase();
    OFFICE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, office)| office.to_string())
        .unwrap_or(code)
}

/// Display name of the register behind an office code.
pub fn office_name(code: &str) -> &str {
    OFFICE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |&(_, name)| name)
}

pub fn is_eu_member(code: &str) -> bool {
    EU_COUNTRIES.contains(&code)
}
