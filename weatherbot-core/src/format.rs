//! Rendering of weather snapshots into the Cantonese morning-report message.
//!
//! Everything here is pure: the clock instant is a parameter, so the same
//! snapshot and instant always produce identical text.

use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::conditions::emoji_for;
use crate::model::WeatherSnapshot;

/// Fixed display timezone for dates and the forecast day window,
/// independent of the configured schedule timezone.
pub const REPORT_TIMEZONE: Tz = chrono_tz::Asia::Hong_Kong;

/// UV index severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UvLevel {
    pub emoji: &'static str,
    pub label: &'static str,
}

/// Classify a UV index. Ascending bands, first match wins.
pub fn uv_descriptor(uv_index: i32) -> UvLevel {
    if uv_index <= 2 {
        UvLevel {
            emoji: "🟢",
            label: "低",
        }
    } else if uv_index <= 5 {
        UvLevel {
            emoji: "🟡",
            label: "中等",
        }
    } else if uv_index <= 7 {
        UvLevel {
            emoji: "🟠",
            label: "高",
        }
    } else if uv_index <= 10 {
        UvLevel {
            emoji: "🔴",
            label: "非常高",
        }
    } else {
        UvLevel {
            emoji: "🟣",
            label: "極高",
        }
    }
}

/// Advice lines derived from the snapshot.
///
/// The four categories (UV, rain, temperature, humidity) are evaluated
/// independently and may all fire on the same day; within a category the
/// first matching rule wins. When nothing fires, a single positive closing
/// line is emitted instead.
pub fn build_advice(weather: &WeatherSnapshot) -> Vec<&'static str> {
    let mut advice = Vec::new();

    if weather.uv_index >= 6 {
        advice.push("紫外線偏高，記得搽防曬呀～ 🧴");
    } else if weather.uv_index >= 3 {
        advice.push("紫外線中等，出門記得戴帽或太陽眼鏡 🕶️");
    }

    if (51..=67).contains(&weather.weather_code) {
        advice.push("今日有雨，記得帶遮呀！ ☂️");
    } else if (80..=82).contains(&weather.weather_code) {
        advice.push("可能會有陣雨，帶把雨傘以防萬一 🌂");
    }

    if weather.temperature_min <= 15 {
        advice.push("朝早會涼涼哋，記得著多件衫呀～ 🧥");
    } else if weather.temperature_max >= 32 {
        advice.push("今日好熱，記得多飲水！ 💧");
    } else if (25..=28).contains(&weather.temperature_max) {
        advice.push("今日氣溫舒適，出門會好開心！ 🌈");
    }

    if weather.humidity >= 85 {
        advice.push("濕度好高，可能會焗焗哋 💦");
    }

    if advice.is_empty() {
        advice.push("今日天氣唔錯，祝你有美好嘅一日！ ✨");
    }

    advice
}

/// `{year}年{month}月{day}日 星期X` in the report timezone.
fn format_date(now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&REPORT_TIMEZONE);

    let weekday = match local.weekday() {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    };

    format!(
        "{}年{}月{}日 {}",
        local.year(),
        local.month(),
        local.day(),
        weekday
    )
}

/// Render the full morning report for a snapshot.
pub fn format_report(weather: &WeatherSnapshot, location_name: &str, now: DateTime<Utc>) -> String {
    let weather_emoji = emoji_for(weather.weather_code);
    let uv = uv_descriptor(weather.uv_index);
    let date_str = format_date(now);

    let advice_lines = build_advice(weather)
        .iter()
        .map(|a| format!("• {a}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🌈 早安呀～今日天氣報告 {weather_emoji}\n\
         \n\
         📍 {location_name}\n\
         📅 {date_str}\n\
         \n\
         🌡️ 溫度：{min}°C（最低）～ {max}°C（最高）\n\
         💧 濕度：{humidity}%\n\
         {uv_emoji} 紫外線指數：{uv_index}（{uv_label}）\n\
         {weather_emoji} 天氣：{condition}\n\
         \n\
         💡 小提醒：\n\
         {advice_lines}\n\
         \n\
         祝你有美好嘅一日 💕",
        min = weather.temperature_min,
        max = weather.temperature_max,
        humidity = weather.humidity,
        uv_emoji = uv.emoji,
        uv_index = weather.uv_index,
        uv_label = uv.label,
        condition = weather.condition,
    )
}

/// Render the fallback message for a failed fetch, carrying the literal
/// failure reason.
pub fn format_failure(location_name: &str, reason: &str) -> String {
    format!(
        "🌈 早安呀～\n\
         \n\
         😅 今日天氣資料暫時攞唔到...\n\
         📍 {location_name}\n\
         \n\
         錯誤原因：{reason}\n\
         \n\
         不過都祝你有美好嘅一日！💕"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: 22,
            temperature_max: 24,
            temperature_min: 18,
            humidity: 60,
            uv_index: 1,
            weather_code: 0,
            condition: "晴天".to_string(),
        }
    }

    #[test]
    fn uv_band_boundaries() {
        assert_eq!(uv_descriptor(0).label, "低");
        assert_eq!(uv_descriptor(2).label, "低");
        assert_eq!(uv_descriptor(3).label, "中等");
        assert_eq!(uv_descriptor(5).label, "中等");
        assert_eq!(uv_descriptor(6).label, "高");
        assert_eq!(uv_descriptor(7).label, "高");
        assert_eq!(uv_descriptor(8).label, "非常高");
        assert_eq!(uv_descriptor(10).label, "非常高");
        assert_eq!(uv_descriptor(11).label, "極高");
        assert_eq!(uv_descriptor(11).emoji, "🟣");
    }

    #[test]
    fn calm_day_gets_only_the_default_line() {
        let advice = build_advice(&snapshot());
        assert_eq!(advice, vec!["今日天氣唔錯，祝你有美好嘅一日！ ✨"]);
    }

    #[test]
    fn rain_code_emits_umbrella_reminder() {
        let weather = WeatherSnapshot {
            weather_code: 61,
            ..snapshot()
        };

        let advice = build_advice(&weather);
        assert!(advice.iter().any(|a| a.contains("有雨") && a.contains("遮")));
    }

    #[test]
    fn shower_codes_emit_the_softer_reminder() {
        let weather = WeatherSnapshot {
            weather_code: 80,
            ..snapshot()
        };

        let advice = build_advice(&weather);
        assert!(advice.iter().any(|a| a.contains("陣雨")));
        assert!(!advice.iter().any(|a| a.contains("帶遮")));
    }

    #[test]
    fn cold_morning_emits_layer_reminder() {
        let weather = WeatherSnapshot {
            temperature_min: 12,
            temperature_max: 18,
            ..snapshot()
        };

        let advice = build_advice(&weather);
        assert!(advice.iter().any(|a| a.contains("涼")));
    }

    #[test]
    fn hot_day_emits_hydration_reminder() {
        let weather = WeatherSnapshot {
            temperature_min: 26,
            temperature_max: 34,
            ..snapshot()
        };

        let advice = build_advice(&weather);
        assert!(advice.iter().any(|a| a.contains("熱")));
    }

    #[test]
    fn pleasant_range_emits_positive_note() {
        let weather = WeatherSnapshot {
            temperature_min: 20,
            temperature_max: 26,
            ..snapshot()
        };

        let advice = build_advice(&weather);
        assert!(advice.iter().any(|a| a.contains("舒適")));
    }

    #[test]
    fn categories_fire_independently() {
        // High UV, rain, cold morning, and high humidity all at once.
        let weather = WeatherSnapshot {
            uv_index: 8,
            weather_code: 63,
            temperature_min: 10,
            temperature_max: 14,
            humidity: 90,
            ..snapshot()
        };

        let advice = build_advice(&weather);
        assert_eq!(advice.len(), 4);
        assert!(advice.iter().any(|a| a.contains("防曬")));
        assert!(advice.iter().any(|a| a.contains("帶遮")));
        assert!(advice.iter().any(|a| a.contains("衫")));
        assert!(advice.iter().any(|a| a.contains("濕度")));
    }

    #[test]
    fn report_contains_all_sections() {
        // 2024-03-15 22:00 UTC is Saturday 2024-03-16 06:00 in Hong Kong.
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 22, 0, 0).unwrap();
        let text = format_report(&snapshot(), "香港", now);

        assert!(text.starts_with("🌈 早安呀～今日天氣報告 ☀️"));
        assert!(text.contains("📍 香港"));
        assert!(text.contains("📅 2024年3月16日 星期六"));
        assert!(text.contains("🌡️ 溫度：18°C（最低）～ 24°C（最高）"));
        assert!(text.contains("💧 濕度：60%"));
        assert!(text.contains("🟢 紫外線指數：1（低）"));
        assert!(text.contains("☀️ 天氣：晴天"));
        assert!(text.contains("• 今日天氣唔錯"));
        assert!(text.ends_with("祝你有美好嘅一日 💕"));
    }

    #[test]
    fn report_is_deterministic_for_a_fixed_instant() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let a = format_report(&snapshot(), "香港", now);
        let b = format_report(&snapshot(), "香港", now);
        assert_eq!(a, b);
    }

    #[test]
    fn failure_message_carries_the_reason() {
        let text = format_failure("香港", "weather API returned 503: Service Unavailable");

        assert!(text.contains("📍 香港"));
        assert!(text.contains("錯誤原因：weather API returned 503: Service Unavailable"));
        assert!(text.ends_with("不過都祝你有美好嘅一日！💕"));
    }
}
