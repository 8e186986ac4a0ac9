use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::voice::session::{
    is_affirmative, FirstLoadOutcome, VoiceError, VoiceSession, ACCEPTED_PROMPT, DECLINED_PROMPT,
    TOGGLE_CONFIRMATION, WELCOME_PROMPT,
};
use crate::voice::speech::{SpeechCapabilities, SpeechSynthesizer};
use crate::voice::turn::VoiceActivity;

#[tokio::test]
async fn speak_without_synthesizer_is_a_silent_no_op() {
    let session = VoiceSession::new(SpeechCapabilities::none(), instant_config());
    session.speak("hello").await;
    assert_eq!(session.activity(), VoiceActivity::Idle);
}

#[tokio::test]
async fn speak_uses_configured_rate_and_pitch_and_cancels_first() {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = session_with(synthesizer.clone(), Arc::new(ScriptedRecognizer::default()));

    session.speak("Hello there").await;

    let utterances = synthesizer.utterances();
    assert_eq!(utterances.len(), 1);
    assert_eq!(utterances[0].text, "Hello there");
    assert!((utterances[0].rate - 0.9).abs() < f32::EPSILON);
    assert!((utterances[0].pitch - 1.0).abs() < f32::EPSILON);
    assert_eq!(synthesizer.cancels(), 1);
    assert_eq!(session.activity(), VoiceActivity::Idle);
}

#[tokio::test]
async fn playback_errors_still_clear_speaking() {
    let synthesizer = Arc::new(RecordingSynthesizer::failing());
    let session = session_with(synthesizer.clone(), Arc::new(ScriptedRecognizer::default()));

    session.speak("this will fail").await;

    assert_eq!(synthesizer.texts(), ["this will fail"]);
    assert!(!session.status().speaking);
}

#[tokio::test]
async fn new_utterance_interrupts_the_one_playing() {
    let synthesizer = Arc::new(UntilCancelledSynthesizer::default());
    let session = Arc::new(VoiceSession::new(
        SpeechCapabilities::none().with_synthesizer(synthesizer.clone()),
        instant_config(),
    ));

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.speak("first").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(synthesizer.started(), 1);
    assert!(session.status().speaking);

    let second = {
        let session = session.clone();
        tokio::spawn(async move { session.speak("second").await })
    };
    first.await.expect("first utterance resolves once interrupted");

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(synthesizer.started(), 2);
    assert!(session.status().speaking);

    synthesizer.cancel();
    second.await.expect("second utterance resolves");
    assert_eq!(session.activity(), VoiceActivity::Idle);
}

#[tokio::test]
async fn superseded_queued_utterance_is_dropped() {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let (recognizer, transcripts) = GatedRecognizer::new();
    let session = Arc::new(VoiceSession::new(
        SpeechCapabilities::new(synthesizer.clone(), Arc::new(recognizer)),
        instant_config(),
    ));

    let listening = {
        let session = session.clone();
        tokio::spawn(async move { session.listen().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    let older = {
        let session = session.clone();
        tokio::spawn(async move { session.speak("older").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    let newer = {
        let session = session.clone();
        tokio::spawn(async move { session.speak("newer").await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(synthesizer.texts().is_empty());

    transcripts
        .send("jobs".to_string())
        .await
        .expect("recognizer waiting");
    listening
        .await
        .expect("task joins")
        .expect("recognizer available");
    older.await.expect("task joins");
    newer.await.expect("task joins");

    assert_eq!(synthesizer.texts(), ["newer"]);
    assert_eq!(session.activity(), VoiceActivity::Idle);
}

#[tokio::test]
async fn listen_without_recognizer_is_rejected() {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = VoiceSession::new(
        SpeechCapabilities::none().with_synthesizer(synthesizer),
        instant_config(),
    );

    match session.listen().await {
        Err(VoiceError::RecognitionUnsupported) => {}
        other => panic!("expected unsupported recognition, got {other:?}"),
    }
    assert!(!session.status().listening);
}

#[tokio::test]
async fn listen_uses_single_shot_settings_and_swallows_recognition_errors() {
    let recognizer = Arc::new(ScriptedRecognizer::failing());
    let session = session_with(Arc::new(RecordingSynthesizer::default()), recognizer.clone());

    let transcript = session.listen().await.expect("recognizer available");
    assert_eq!(transcript, "");
    assert!(!session.status().listening);

    let settings = recognizer.settings();
    assert_eq!(settings.len(), 1);
    assert_eq!(settings[0].locale, "en-US");
    assert!(!settings[0].interim_results);
    assert_eq!(settings[0].max_alternatives, 1);
}

#[tokio::test]
async fn listening_flag_spans_exactly_the_listen_call() {
    let (recognizer, transcripts) = GatedRecognizer::new();
    let session = Arc::new(VoiceSession::new(
        SpeechCapabilities::none().with_recognizer(Arc::new(recognizer)),
        instant_config(),
    ));
    assert!(!session.status().listening);

    let listening = {
        let session = session.clone();
        tokio::spawn(async move { session.listen().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    let status = session.status();
    assert!(status.listening);
    assert!(!status.speaking);

    transcripts
        .send("show me design jobs".to_string())
        .await
        .expect("recognizer waiting");
    let transcript = listening
        .await
        .expect("task joins")
        .expect("recognizer available");
    assert_eq!(transcript, "show me design jobs");
    assert!(!session.status().listening);
}

#[tokio::test]
async fn activity_never_reports_overlapping_turns() {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = session_with(
        synthesizer,
        Arc::new(ScriptedRecognizer::saying(&["yes", "apply"])),
    );
    let mut changes = session.subscribe();
    let observed = Arc::new(std::sync::Mutex::new(Vec::new()));

    let watcher = {
        let observed = observed.clone();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let activity = *changes.borrow_and_update();
                observed.lock().expect("observed mutex").push(activity);
            }
        })
    };

    for _ in 0..3 {
        let (_, heard) = tokio::join!(session.speak("prompt"), session.listen());
        heard.expect("recognizer available");
    }

    drop(session);
    watcher.await.expect("watcher ends with the session");

    for activity in observed.lock().expect("observed mutex").iter() {
        assert!(!(activity.is_listening() && activity.is_speaking()));
    }
}

#[tokio::test]
async fn enabling_speaks_one_confirmation_only_on_transition() {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = session_with(synthesizer.clone(), Arc::new(ScriptedRecognizer::default()));

    session.enable(true).await;
    session.enable(true).await;
    session.enable(false).await;

    assert!(!session.is_enabled());
    assert_eq!(synthesizer.texts(), [TOGGLE_CONFIRMATION]);
}

#[tokio::test]
async fn first_load_accepts_affirmative_answers() {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = session_with(
        synthesizer.clone(),
        Arc::new(ScriptedRecognizer::saying(&["Yes please"])),
    );

    let outcome = session
        .start_first_load()
        .expect("first start runs")
        .await
        .expect("task joins");

    assert_eq!(outcome, FirstLoadOutcome::Accepted);
    assert!(session.is_enabled());
    assert!(session.status().has_asked);
    assert_eq!(synthesizer.texts(), [WELCOME_PROMPT, ACCEPTED_PROMPT]);
}

#[tokio::test]
async fn first_load_declines_anything_else() {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = session_with(
        synthesizer.clone(),
        Arc::new(ScriptedRecognizer::saying(&["no thanks"])),
    );

    let outcome = session
        .start_first_load()
        .expect("first start runs")
        .await
        .expect("task joins");

    assert_eq!(outcome, FirstLoadOutcome::Declined);
    assert!(!session.is_enabled());
    assert_eq!(synthesizer.texts(), [WELCOME_PROMPT, DECLINED_PROMPT]);
}

#[tokio::test]
async fn first_load_runs_once_per_session() {
    let session = session_with(
        Arc::new(RecordingSynthesizer::default()),
        Arc::new(ScriptedRecognizer::saying(&["sure"])),
    );

    let handle = session.start_first_load().expect("first start runs");
    assert!(session.start_first_load().is_none());
    handle.await.expect("task joins");
    assert!(session.start_first_load().is_none());
}

#[tokio::test]
async fn first_load_without_recognition_continues_silently() {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = Arc::new(VoiceSession::new(
        SpeechCapabilities::none().with_synthesizer(synthesizer.clone()),
        instant_config(),
    ));

    let outcome = session
        .start_first_load()
        .expect("first start runs")
        .await
        .expect("task joins");

    assert_eq!(outcome, FirstLoadOutcome::Unsupported);
    assert!(!session.is_enabled());
    assert!(session.status().has_asked);
    assert_eq!(synthesizer.texts(), [WELCOME_PROMPT]);
}

#[test]
fn affirmative_detection_is_case_insensitive() {
    assert!(is_affirmative("YEAH sure"));
    assert!(is_affirmative("Yes please"));
    assert!(!is_affirmative("no thanks"));
    assert!(!is_affirmative(""));
}
