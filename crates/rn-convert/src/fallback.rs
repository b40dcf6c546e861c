//! Built-in character table used when no full backend is active.

/// High-frequency simplified characters and their traditional forms.
#[rustfmt::skip]
const FALLBACK_TABLE: &[(char, char)] = &[
    ('国', '國'), ('爱', '愛'), ('华', '華'), ('宝', '寶'), ('电', '電'), ('开', '開'), ('关', '關'),
    ('医', '醫'), ('车', '車'), ('书', '書'), ('听', '聽'), ('发', '發'), ('门', '門'), ('专', '專'),
    ('难', '難'), ('业', '業'), ('东', '東'), ('画', '畫'), ('写', '寫'), ('马', '馬'), ('鸟', '鳥'),
    ('儿', '兒'), ('语', '語'), ('头', '頭'), ('见', '見'), ('气', '氣'), ('长', '長'), ('实', '實'),
    ('后', '後'), ('机', '機'), ('权', '權'), ('变', '變'), ('现', '現'), ('务', '務'), ('际', '際'),
];

/// Maps one character through the fallback table.
#[inline]
fn lookup(c: char) -> char {
    FALLBACK_TABLE
        .iter()
        .find_map(|&(simplified, traditional)| (simplified == c).then_some(traditional))
        .unwrap_or(c)
}

/// Converts `text` character by character using the fallback table.
///
/// Characters outside the table are kept unchanged.
#[must_use]
pub fn convert(text: &str) -> String {
    text.chars().map(lookup).collect()
}

/// Number of characters covered by the fallback table.
#[must_use]
pub const fn table_len() -> usize {
    FALLBACK_TABLE.len()
}
