//! Region codes used by games and their display names.

/// Known region codes paired with their display names.
pub const REGIONS: &[(&str, &str)] = &[
    ("keelung", "基隆市"),
    ("taipei", "臺北市"),
    ("new-taipei", "新北市"),
    ("taoyuan", "桃園市"),
    ("hsinchu-city", "新竹市"),
    ("hsinchu-county", "新竹縣"),
    ("miaoli", "苗栗縣"),
    ("taichung", "臺中市"),
    ("changhua", "彰化縣"),
    ("nantou", "南投縣"),
    ("yunlin", "雲林縣"),
    ("chiayi-city", "嘉義市"),
    ("chiayi-county", "嘉義縣"),
    ("tainan", "臺南市"),
    ("kaohsiung", "高雄市"),
    ("pingtung", "屏東縣"),
    ("yilan", "宜蘭縣"),
    ("hualien", "花蓮縣"),
    ("taitung", "臺東縣"),
    ("penghu", "澎湖縣"),
    ("kinmen", "金門縣"),
    ("lienchiang", "連江縣"),
];

/// Returns the display name for a region code, or the code itself when unknown.
pub fn region_name(code: &str) -> &str {
    REGIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}
