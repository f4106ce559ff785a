use serde::{Deserialize, Serialize};

/// 问题实例（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSpec {
    pub label: String,
    #[serde(default)]
    pub hash: i64,
    pub resources: Vec<ResourceSpec>,
    pub trains: Vec<TrainSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub id: String,
    /// 追踪间隔
    pub release_time: DurationSpec,
    #[serde(default)]
    pub following_allowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSpec {
    pub id: String,
    /// 缺省时取第一条区段的起点
    #[serde(default)]
    pub start_node: Option<String>,
    /// `HH:MM:SS`，缺省为 00:00:00
    #[serde(default)]
    pub earliest_start: Option<String>,
    pub sections: Vec<SectionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    #[serde(default)]
    pub route_path: Option<String>,
    pub from: String,
    pub to: String,
    pub minimum_running_time: DurationSpec,
    #[serde(default)]
    pub resource_occupations: Vec<String>,
    #[serde(default)]
    pub penalty: f64,
    #[serde(default)]
    pub requirement: Option<RequirementSpec>,
}

/// 区段时刻要求；`min_stopping_time` 为正即为停站要求。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementSpec {
    pub marker: String,
    #[serde(default)]
    pub entry_earliest: Option<String>,
    #[serde(default)]
    pub entry_latest: Option<String>,
    #[serde(default)]
    pub exit_earliest: Option<String>,
    #[serde(default)]
    pub exit_latest: Option<String>,
    /// 最短停站时间
    #[serde(default)]
    pub min_stopping_time: DurationSpec,
    #[serde(default = "default_weight")]
    pub entry_delay_weight: f64,
    #[serde(default = "default_weight")]
    pub exit_delay_weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// 时长：整数秒，或 ISO-8601 形式（如 `"PT30S"`、`"PT1M30S"`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationSpec {
    Secs(u64),
    Iso(String),
}

impl Default for DurationSpec {
    fn default() -> Self {
        DurationSpec::Secs(0)
    }
}

impl DurationSpec {
    /// 折算为整秒；小数秒截断。格式不合法时返回 `None`。
    pub fn to_secs(&self) -> Option<u64> {
        match self {
            DurationSpec::Secs(s) => Some(*s),
            DurationSpec::Iso(raw) => parse_iso_duration(raw),
        }
    }
}

/// 解析 `P[nD][T[nH][nM][nS]]`。不支持年、月、周。
fn parse_iso_duration(raw: &str) -> Option<u64> {
    let rest = raw.trim().strip_prefix('P')?;
    let (date, time) = match rest.split_once('T') {
        Some((d, t)) if !t.is_empty() => (d, Some(t)),
        Some(_) => return None,
        None => (rest, None),
    };
    if date.is_empty() && time.is_none() {
        return None;
    }

    let mut total: u64 = 0;
    let mut num = String::new();
    for c in date.chars() {
        match c {
            '0'..='9' => num.push(c),
            'D' => {
                total = total.checked_add(num.parse::<u64>().ok()?.checked_mul(86_400)?)?;
                num.clear();
            }
            _ => return None,
        }
    }
    if !num.is_empty() {
        return None;
    }

    for c in time.unwrap_or("").chars() {
        match c {
            '0'..='9' | '.' => num.push(c),
            'H' | 'M' | 'S' => {
                let scale = match c {
                    'H' => 3_600.0,
                    'M' => 60.0,
                    _ => 1.0,
                };
                let v: f64 = num.parse().ok()?;
                total = total.checked_add((v * scale) as u64)?;
                num.clear();
            }
            _ => return None,
        }
    }
    if !num.is_empty() {
        return None;
    }
    Some(total)
}
