use regex::Regex;

use super::{COMPETENCY_TAGS, LanguageProfile, star_family_count};

/// Traditional Chinese (Taiwan) phrase tables, serving the "zh-TW" tag.
///
/// CJK text has no word boundaries, so patterns are plain substring
/// alternations rather than `\b`-anchored words.
pub struct ChineseProfile {
    situation: Regex,
    task: Regex,
    action: Regex,
    result: Regex,
    metrics: Regex,
    competencies: Vec<(&'static str, Regex)>,
}

impl ChineseProfile {
    pub fn new() -> Self {
        let competencies = COMPETENCY_TAGS
            .iter()
            .map(|&tag| (tag, re(competency_pattern(tag))))
            .collect();

        Self {
            situation: re("當時|那時|之前|以前|背景是|情況是|遇到|面臨|在我任職"),
            task: re("任務|目標|負責|需要|必須|被指派|我的工作"),
            action: re("我決定|我帶領|我負責|我主動|於是我|我採取|我規劃|我執行|我安排|我提出"),
            result: re("結果|最終|最後|因此|提升|改善|增加|減少|達成|完成了|交付"),
            metrics: re(
                r"\d+(\.\d+)?\s*(%|％|個|位|倍|人|次|小時|天|週|個月|年|萬|億|元)|百分之[一二三四五六七八九十百\d]+",
            ),
            competencies,
        }
    }
}

impl Default for ChineseProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageProfile for ChineseProfile {
    fn tag(&self) -> &str {
        "zh-TW"
    }

    fn star_score(&self, text: &str) -> u8 {
        star_family_count(text, &self.situation, &self.task, &self.action, &self.result)
    }

    fn has_metrics(&self, text: &str) -> bool {
        self.metrics.is_match(text)
    }

    fn detect_competencies(&self, text: &str) -> Vec<String> {
        self.competencies
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(tag, _)| tag.to_string())
            .collect()
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern")
}

fn competency_pattern(tag: &str) -> &'static str {
    match tag {
        "leadership" => "帶領|領導|指導|培養|帶團隊|管理團隊",
        "teamwork" => "團隊|合作|協作|配合|同事",
        "problem-solving" => "問題|解決|分析|排查|根本原因|除錯",
        "communication" => "溝通|簡報|說明|表達|說服|協調",
        "pressure-handling" => "壓力|期限|緊急|趕工|高壓|截止",
        "conflict-resolution" => "衝突|分歧|爭執|調解|妥協|意見不合",
        "adaptability" => "適應|調整|轉變|變化|彈性|轉換",
        "achievement" => "成果|成就|達成|交付|超越|獲獎|成功",
        "learning" => "學習|進修|課程|成長|證照|回饋",
        "ownership" => "主動|當責|負責任|承擔|自發|挺身",
        _ => unreachable!("unknown competency tag"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_cues() {
        let profile = ChineseProfile::new();
        let text = "當時系統常常出問題，我決定重寫部署流程，最終錯誤率減少了一半";
        // situation + action + result
        assert!(profile.star_score(text) >= 3);
    }

    #[test]
    fn test_star_bounded() {
        let profile = ChineseProfile::new();
        let text = "當時我的任務是改善效能，於是我重構了查詢，結果提升了三倍，因此達成目標";
        assert_eq!(profile.star_score(text), 4);
    }

    #[test]
    fn test_metrics() {
        let profile = ChineseProfile::new();
        assert!(profile.has_metrics("效能提升了3倍"));
        assert!(profile.has_metrics("節省百分之二十的成本"));
        assert!(profile.has_metrics("一個 5 人的團隊"));
        assert!(!profile.has_metrics("效能提升了很多"));
    }

    #[test]
    fn test_competency_detection() {
        let profile = ChineseProfile::new();
        let detected = profile.detect_competencies("我帶領團隊解決了上線的問題");
        assert!(detected.contains(&"leadership".to_string()));
        assert!(detected.contains(&"teamwork".to_string()));
        assert!(detected.contains(&"problem-solving".to_string()));
    }
}
