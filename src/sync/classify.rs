use crate::garoon::Event;

pub const WEEKLY_REST_LABEL: &str = "週休";
pub const OUT_LABEL: &str = "外出";

/// The mutually exclusive attendance states a day can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceState {
    /// At least one event of the day carries a holiday menu.
    WeeklyRest,
    /// No holiday, but at least one event carries an outing menu.
    Out,
    /// Ordinary attendance at the configured default place.
    Usual,
}

impl AttendanceState {
    /// The text written into the person's cell for this state.
    #[must_use]
    pub fn label<'a>(&self, normal_place: &'a str) -> &'a str {
        match self {
            Self::WeeklyRest => WEEKLY_REST_LABEL,
            Self::Out => OUT_LABEL,
            Self::Usual => normal_place,
        }
    }
}

/// Classifies a day's events with strict priority: a single holiday-menu
/// event makes the whole day a weekly rest no matter what else is scheduled,
/// outing menus come second, everything else is ordinary attendance.
#[must_use]
pub fn classify(events: &[Event], holiday_menus: &[String], outing_menus: &[String]) -> AttendanceState {
    if events.is_empty() {
        return AttendanceState::Usual;
    }

    if events
        .iter()
        .any(|event| holiday_menus.iter().any(|menu| *menu == event.event_menu))
    {
        return AttendanceState::WeeklyRest;
    }

    if events
        .iter()
        .any(|event| outing_menus.iter().any(|menu| *menu == event.event_menu))
    {
        return AttendanceState::Out;
    }

    AttendanceState::Usual
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::garoon::EventDateTime;

    fn event(menu: &str) -> Event {
        Event {
            id: "1".to_string(),
            subject: "test".to_string(),
            event_menu: menu.to_string(),
            start: EventDateTime {
                date_time: "2025-02-20T09:00:00+09:00".to_string(),
                time_zone: "Asia/Tokyo".to_string(),
            },
            end: EventDateTime {
                date_time: "2025-02-20T10:00:00+09:00".to_string(),
                time_zone: "Asia/Tokyo".to_string(),
            },
            location: None,
        }
    }

    fn menus(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn test_empty_day_is_usual() {
        let state = classify(&[], &menus(&["休暇"]), &menus(&["出張"]));
        assert_eq!(state, AttendanceState::Usual);
        assert_eq!(state.label("渋谷"), "渋谷");
    }

    #[test]
    fn test_holiday_menu_wins() {
        let events = vec![event("出張"), event("休暇")];
        let state = classify(&events, &menus(&["休暇"]), &menus(&["出張"]));
        assert_eq!(state, AttendanceState::WeeklyRest);
        assert_eq!(state.label("渋谷"), "週休");
    }

    #[test]
    fn test_holiday_beats_outing_regardless_of_order() {
        let events = vec![event("休暇"), event("出張"), event("外出")];
        let state = classify(&events, &menus(&["休暇"]), &menus(&["出張", "外出"]));
        assert_eq!(state, AttendanceState::WeeklyRest);
    }

    #[test]
    fn test_outing_menu() {
        let events = vec![event("打ち合わせ"), event("出張")];
        let state = classify(&events, &menus(&["休暇"]), &menus(&["出張"]));
        assert_eq!(state, AttendanceState::Out);
        assert_eq!(state.label("渋谷"), "外出");
    }

    #[test]
    fn test_unconfigured_menus_are_usual() {
        let events = vec![event("会議"), event("")];
        let state = classify(&events, &menus(&["休暇"]), &menus(&["出張"]));
        assert_eq!(state, AttendanceState::Usual);
    }
}
