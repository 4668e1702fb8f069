//! Static EN→KR display vocabularies: club names, position labels, and the
//! at-bat outcome tables used by the game-detail view. Unmapped inputs pass
//! through unchanged so new upstream vocabulary degrades to English, not to
//! an error.

/// Korean club name as commonly written in Korean media.
pub fn team_name_kr(english: &str) -> &str {
    match english {
        // American League East
        "Baltimore Orioles" => "볼티모어 오리올스",
        "Boston Red Sox" => "보스턴 레드삭스",
        "New York Yankees" => "뉴욕 양키스",
        "Tampa Bay Rays" => "탬파베이 레이스",
        "Toronto Blue Jays" => "토론토 블루제이스",

        // American League Central
        "Chicago White Sox" => "시카고 화이트삭스",
        "Cleveland Guardians" => "클리블랜드 가디언스",
        "Detroit Tigers" => "디트로이트 타이거스",
        "Kansas City Royals" => "캔자스시티 로열스",
        "Minnesota Twins" => "미네소타 트윈스",

        // American League West
        "Houston Astros" => "휴스턴 애스트로스",
        "Los Angeles Angels" => "LA 에인절스",
        "Oakland Athletics" => "오클랜드 애슬레틱스",
        "Seattle Mariners" => "시애틀 매리너스",
        "Texas Rangers" => "텍사스 레인저스",

        // National League East
        "Atlanta Braves" => "애틀랜타 브레이브스",
        "Miami Marlins" => "마이애미 말린스",
        "New York Mets" => "뉴욕 메츠",
        "Philadelphia Phillies" => "필라델피아 필리스",
        "Washington Nationals" => "워싱턴 내셔널스",

        // National League Central
        "Chicago Cubs" => "시카고 컵스",
        "Cincinnati Reds" => "신시내티 레즈",
        "Milwaukee Brewers" => "밀워키 브루어스",
        "Pittsburgh Pirates" => "피츠버그 파이리츠",
        "St. Louis Cardinals" => "세인트루이스 카디널스",

        // National League West
        "Arizona Diamondbacks" => "애리조나 다이아몬드백스",
        "Colorado Rockies" => "콜로라도 로키스",
        "Los Angeles Dodgers" => "LA 다저스",
        "San Diego Padres" => "샌디에이고 파드리스",
        "San Francisco Giants" => "샌프란시스코 자이언츠",

        other => other,
    }
}

fn single_position_kr(abbrev: &str) -> &str {
    match abbrev {
        "P" | "Pitcher" => "투수",
        "SP" => "선발투수",
        "RP" => "구원투수",
        "CP" => "마무리투수",
        "C" | "Catcher" => "포수",
        "1B" => "1루수",
        "2B" => "2루수",
        "3B" => "3루수",
        "SS" => "유격수",
        "IF" | "Infielder" => "내야수",
        "LF" => "좌익수",
        "CF" => "중견수",
        "RF" => "우익수",
        "OF" | "Outfielder" => "외야수",
        "DH" | "Designated Hitter" => "지명타자",
        "TWP" => "투타겸업",
        "UTIL" | "Utility" => "유틸리티",
        other => other,
    }
}

/// Korean position label. Compound positions ("SS/2B") are split and
/// translated piecewise.
pub fn position_kr(abbrev: &str) -> String {
    if abbrev.is_empty() {
        return "포지션 정보 없음".into();
    }
    if abbrev.contains('/') {
        return abbrev
            .split('/')
            .map(|p| single_position_kr(p.trim()))
            .collect::<Vec<_>>()
            .join("/");
    }
    single_position_kr(abbrev).to_owned()
}

/// At-bat outcome as seen from the batter's side.
pub fn batting_event_kr(event: &str) -> &str {
    match event {
        "Single" => "1루타",
        "Double" => "2루타",
        "Triple" => "3루타",
        "Home Run" => "홈런",
        "Walk" => "볼넷",
        "Intent Walk" => "고의사구",
        "Hit By Pitch" => "몸에맞는공",
        "Strikeout" => "삼진",
        "Groundout" => "땅볼아웃",
        "Flyout" => "뜬공아웃",
        "Lineout" => "라인드라이브아웃",
        "Pop Out" => "내야뜬공",
        "Sac Fly" => "희생플라이",
        "Sac Bunt" => "희생번트",
        "Fielders Choice" => "야수선택",
        "Field Error" | "Error" => "실책",
        "Forceout" => "포스아웃",
        "Grounded Into DP" => "병살타",
        "Double Play" => "병살",
        other => other,
    }
}

/// Same outcomes from the pitcher's side; a strikeout is a 탈삼진 here.
pub fn pitching_event_kr(event: &str) -> &str {
    match event {
        "Strikeout" => "탈삼진",
        "Groundout" => "땅볼",
        "Flyout" => "뜬공",
        "Lineout" => "라인드라이브",
        "Pop Out" => "내야뜬공",
        "Single" => "1루타",
        "Double" => "2루타",
        "Triple" => "3루타",
        "Home Run" => "홈런",
        "Walk" => "볼넷",
        "Intent Walk" => "고의사구",
        "Hit By Pitch" => "몸에맞는공",
        "Sac Fly" => "희생플라이",
        "Sac Bunt" => "희생번트",
        "Fielders Choice" => "야수선택",
        "Field Error" | "Error" => "실책",
        "Forceout" => "포스아웃",
        "Grounded Into DP" => "병살타",
        "Double Play" => "병살",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_names_translate_or_pass_through() {
        assert_eq!(team_name_kr("Los Angeles Dodgers"), "LA 다저스");
        assert_eq!(team_name_kr("San Diego Padres"), "샌디에이고 파드리스");
        assert_eq!(team_name_kr("El Paso Chihuahuas"), "El Paso Chihuahuas");
    }

    #[test]
    fn compound_positions_split_on_slash() {
        assert_eq!(position_kr("SS/2B"), "유격수/2루수");
        assert_eq!(position_kr("DH"), "지명타자");
        assert_eq!(position_kr(""), "포지션 정보 없음");
    }

    #[test]
    fn batter_and_pitcher_vocabularies_differ_on_strikeout() {
        assert_eq!(batting_event_kr("Strikeout"), "삼진");
        assert_eq!(pitching_event_kr("Strikeout"), "탈삼진");
    }

    #[test]
    fn unknown_events_pass_through() {
        assert_eq!(batting_event_kr("Catcher Interference"), "Catcher Interference");
    }
}
