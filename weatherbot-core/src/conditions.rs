//! WMO weather interpretation codes.
//!
//! <https://open-meteo.com/en/docs>

/// Weather condition description for a WMO code.
///
/// Total over all integers: codes outside the table map to the
/// unknown-condition sentinel.
pub fn condition_for(code: i32) -> &'static str {
    match code {
        0 => "晴天",
        1 => "大致晴朗",
        2 => "局部多雲",
        3 => "多雲",
        45 => "有霧",
        48 => "霧凇",
        51 => "微雨",
        53 => "小雨",
        55 => "中雨",
        56 | 57 => "凍雨",
        61 => "小雨",
        63 => "中雨",
        65 => "大雨",
        66 | 67 => "凍雨",
        71 => "小雪",
        73 => "中雪",
        75 => "大雪",
        77 => "雪粒",
        80 | 81 => "陣雨",
        82 => "大陣雨",
        85 => "小陣雪",
        86 => "大陣雪",
        95 => "雷暴",
        96 => "雷暴夾雹",
        99 => "雷暴夾大雹",
        _ => "未知天氣",
    }
}

/// Display emoji for a WMO code.
///
/// Ascending bands, first match wins. This is a coarser classification axis
/// than [`condition_for`]: a code with a specific textual name can still fall
/// into a broader emoji band.
pub fn emoji_for(code: i32) -> &'static str {
    if code == 0 {
        return "☀️";
    }
    if code <= 3 {
        return "🌤️";
    }
    if code <= 48 {
        return "🌫️";
    }
    if code <= 67 {
        return "🌧️";
    }
    if code <= 77 {
        return "❄️";
    }
    if code <= 82 {
        return "🌦️";
    }
    "⛈️"
}
