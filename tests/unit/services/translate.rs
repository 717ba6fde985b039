use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

struct Counting {
    calls: AtomicUsize,
    answer: Result<&'static str, &'static str>,
}

impl Counting {
    fn new(answer: Result<&'static str, &'static str>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            answer,
        }
    }
}

#[async_trait::async_trait]
impl NameTranslator for Counting {
    async fn translate(&self, _text: &str, target: Lang) -> CardResult<String> {
        assert_eq!(target, Lang::En);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .map(str::to_owned)
            .map_err(CardError::external)
    }
}

#[tokio::test]
async fn translation_is_requested_once_then_cached() {
    let t = Counting::new(Ok("Ethiopia Yirgacheffe"));
    let mut state = DisplayNameState::new("에티오피아 예가체프");

    assert_eq!(state.toggle_language(&t).await.unwrap(), "Ethiopia Yirgacheffe");
    assert_eq!(state.lang(), Lang::En);
    assert_eq!(state.toggle_language(&t).await.unwrap(), "에티오피아 예가체프");
    assert_eq!(state.toggle_language(&t).await.unwrap(), "Ethiopia Yirgacheffe");
    assert_eq!(t.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failure_keeps_previous_name() {
    let t = Counting::new(Err("quota exceeded"));
    let mut state = DisplayNameState::new("하우스 블렌드");
    let err = state.toggle_language(&t).await.unwrap_err();
    assert!(matches!(err, CardError::ExternalService(_)));
    assert!(err.is_recoverable());
    assert_eq!(state.current(), "하우스 블렌드");
    assert_eq!(state.lang(), Lang::Ko);
    assert!(!state.is_translating());
}

#[tokio::test]
async fn blank_translation_counts_as_failure() {
    let t = Counting::new(Ok("   "));
    let mut state = DisplayNameState::new("게이샤");
    assert!(state.toggle_language(&t).await.is_err());
    assert_eq!(state.cached_translation(), None);
    assert_eq!(state.current(), "게이샤");
}

#[test]
fn toggle_while_translating_is_rejected() {
    let mut state = DisplayNameState::new("케냐 AA");
    let ToggleStep::Translate { ticket, text } = state.start_toggle().unwrap() else {
        panic!("expected a translation request");
    };
    assert_eq!(text, "케냐 AA");
    assert!(state.is_translating());
    assert!(matches!(
        state.start_toggle(),
        Err(CardError::RequestInFlight(_))
    ));

    assert_eq!(state.finish_toggle(ticket, Ok("Kenya AA".to_owned())).unwrap(), "Kenya AA");
}

#[test]
fn late_result_after_invalidate_is_discarded() {
    let mut state = DisplayNameState::new("과테말라");
    let ToggleStep::Translate { ticket, .. } = state.start_toggle().unwrap() else {
        panic!("expected a translation request");
    };
    state.invalidate();
    assert_eq!(state.finish_toggle(ticket, Ok("Guatemala".to_owned())).unwrap(), "과테말라");
    assert_eq!(state.cached_translation(), None);
    assert_eq!(state.lang(), Lang::Ko);
}

#[test]
fn prompt_names_target_language() {
    let p = build_translation_prompt("콜롬비아", Lang::En);
    assert!(p.contains("natural English"));
    assert!(p.ends_with("콜롬비아"));
}
