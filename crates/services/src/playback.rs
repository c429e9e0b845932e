use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

use crate::error::PlaybackError;
use crate::scoring::{ScoringClient, Speed, Voice};

/// Which of the two comparison sources a clip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackSource {
    MyRecording,
    Reference,
}

/// A playable clip: a platform handle to the user's recording, or
/// synthesized bytes fetched from the TTS endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioClip {
    Local { uri: String },
    Synthesized { bytes: Arc<Vec<u8>> },
}

/// Discrete playback transitions reported to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The reference clip is fetched and cached.
    ReferenceLoaded,
    Started(PlaybackSource),
    Position {
        source: PlaybackSource,
        position_ms: u64,
    },
    /// The source finished playing on its own.
    Completed(PlaybackSource),
    /// The source was stopped before its natural end.
    Stopped(PlaybackSource),
}

/// Observer for playback state transitions.
pub trait PlaybackObserver: Send + Sync {
    fn on_event(&self, event: &PlaybackEvent);
}

/// Audible output seam implemented by the platform shell.
///
/// The shell reports natural completion and progress back through
/// [`ComparePlayer::notify_completed`] and
/// [`ComparePlayer::notify_position`].
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Begin audible playback of `clip` from the start.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Output` if the device refuses.
    async fn play(&self, source: PlaybackSource, clip: &AudioClip) -> Result<(), PlaybackError>;

    /// Stop playback of `source` if it is currently audible.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Output` if the device refuses.
    async fn stop(&self, source: PlaybackSource) -> Result<(), PlaybackError>;
}

/// Gap between the reference finishing and the recording starting in the
/// alternating sequence.
const ALTERNATE_GAP: Duration = Duration::from_millis(500);

/// Plays the user's recording against the synthesized reference with
/// mutual exclusion: at most one source is audible at any instant.
///
/// Reference audio is fetched once per distinct (text, voice, speed)
/// combination and cached for the player's lifetime.
pub struct ComparePlayer {
    output: Arc<dyn AudioOutput>,
    scoring: Arc<ScoringClient>,
    my_clip: AudioClip,
    reference_text: String,
    voice: Voice,
    speed: Speed,
    reference_cache: HashMap<(String, Voice, Speed), Arc<Vec<u8>>>,
    playing: Option<PlaybackSource>,
    pending_followup: bool,
    observers: Vec<Arc<dyn PlaybackObserver>>,
}

impl ComparePlayer {
    #[must_use]
    pub fn new(
        output: Arc<dyn AudioOutput>,
        scoring: Arc<ScoringClient>,
        my_recording_uri: String,
        reference_text: String,
        voice: Voice,
        speed: Speed,
    ) -> Self {
        Self {
            output,
            scoring,
            my_clip: AudioClip::Local {
                uri: my_recording_uri,
            },
            reference_text,
            voice,
            speed,
            reference_cache: HashMap::new(),
            playing: None,
            pending_followup: false,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn PlaybackObserver>) {
        self.observers.push(observer);
    }

    /// The source currently reported as playing, if any.
    #[must_use]
    pub fn playing(&self) -> Option<PlaybackSource> {
        self.playing
    }

    #[must_use]
    pub fn is_playing(&self, source: PlaybackSource) -> bool {
        self.playing == Some(source)
    }

    /// Fetch and cache the synthesized reference clip for the current
    /// (text, voice, speed) combination. Repeated calls reuse the cache.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Scoring` if the TTS request fails.
    pub async fn ensure_reference(&mut self) -> Result<AudioClip, PlaybackError> {
        let key = (self.reference_text.clone(), self.voice, self.speed);
        if let Some(bytes) = self.reference_cache.get(&key) {
            return Ok(AudioClip::Synthesized {
                bytes: Arc::clone(bytes),
            });
        }
        let bytes = Arc::new(
            self.scoring
                .synthesize(&self.reference_text, self.voice, self.speed)
                .await?,
        );
        self.reference_cache.insert(key, Arc::clone(&bytes));
        self.emit(&PlaybackEvent::ReferenceLoaded);
        Ok(AudioClip::Synthesized { bytes })
    }

    /// Seed the reference cache with already-fetched bytes, skipping the
    /// TTS round trip.
    pub fn preload_reference(&mut self, bytes: Vec<u8>) {
        let key = (self.reference_text.clone(), self.voice, self.speed);
        self.reference_cache.insert(key, Arc::new(bytes));
        self.emit(&PlaybackEvent::ReferenceLoaded);
    }

    /// Start playback of one source, stopping the other first so at most
    /// one is audible. Playing an already-playing source stops it.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError` if loading the reference or driving the
    /// output fails.
    pub async fn play(&mut self, source: PlaybackSource) -> Result<(), PlaybackError> {
        if self.playing == Some(source) {
            return self.stop(source).await;
        }
        if let Some(other) = self.playing {
            self.output.stop(other).await?;
            self.playing = None;
            self.emit(&PlaybackEvent::Stopped(other));
        }

        let clip = match source {
            PlaybackSource::MyRecording => self.my_clip.clone(),
            PlaybackSource::Reference => self.ensure_reference().await?,
        };
        self.output.play(source, &clip).await?;
        self.playing = Some(source);
        self.emit(&PlaybackEvent::Started(source));
        Ok(())
    }

    /// Manually stop one source. Never cascades to the other source, and
    /// a stopped reference forfeits its scripted follow-up: only natural
    /// completion continues the alternating sequence.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Output` if the device refuses.
    pub async fn stop(&mut self, source: PlaybackSource) -> Result<(), PlaybackError> {
        self.output.stop(source).await?;
        if self.playing == Some(source) {
            self.playing = None;
        }
        if source == PlaybackSource::Reference {
            self.pending_followup = false;
        }
        self.emit(&PlaybackEvent::Stopped(source));
        Ok(())
    }

    /// Scripted alternation: play the reference to completion, then the
    /// user's recording after a short gap.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError` if loading or starting the reference fails.
    pub async fn play_alternating(&mut self) -> Result<(), PlaybackError> {
        if self.playing == Some(PlaybackSource::Reference) {
            // restart from the top rather than toggling off
            self.stop(PlaybackSource::Reference).await?;
        }
        self.play(PlaybackSource::Reference).await?;
        self.pending_followup = true;
        Ok(())
    }

    /// Report that `source` finished playing on its own. Drives the
    /// alternating sequence when the reference ends naturally.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError` if the follow-up playback fails to start.
    pub async fn notify_completed(&mut self, source: PlaybackSource) -> Result<(), PlaybackError> {
        if self.playing == Some(source) {
            self.playing = None;
        }
        self.emit(&PlaybackEvent::Completed(source));

        if source == PlaybackSource::Reference && self.pending_followup {
            self.pending_followup = false;
            debug!("reference finished, starting recording after gap");
            sleep(ALTERNATE_GAP).await;
            self.play(PlaybackSource::MyRecording).await?;
        }
        Ok(())
    }

    /// Forward a position update from the audio backend to observers.
    pub fn notify_position(&self, source: PlaybackSource, position_ms: u64) {
        self.emit(&PlaybackEvent::Position {
            source,
            position_ms,
        });
    }

    fn emit(&self, event: &PlaybackEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sori_core::Clock;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Play(PlaybackSource),
        Stop(PlaybackSource),
    }

    #[derive(Default)]
    struct MockOutput {
        calls: Mutex<Vec<Call>>,
    }

    impl MockOutput {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AudioOutput for MockOutput {
        async fn play(
            &self,
            source: PlaybackSource,
            _clip: &AudioClip,
        ) -> Result<(), PlaybackError> {
            self.calls.lock().unwrap().push(Call::Play(source));
            Ok(())
        }

        async fn stop(&self, source: PlaybackSource) -> Result<(), PlaybackError> {
            self.calls.lock().unwrap().push(Call::Stop(source));
            Ok(())
        }
    }

    #[derive(Default)]
    struct EventLog {
        events: Mutex<Vec<PlaybackEvent>>,
    }

    impl EventLog {
        fn events(&self) -> Vec<PlaybackEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl PlaybackObserver for EventLog {
        fn on_event(&self, event: &PlaybackEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn build_player(output: Arc<MockOutput>) -> ComparePlayer {
        let scoring = Arc::new(ScoringClient::from_env(Clock::default_clock()));
        let mut player = ComparePlayer::new(
            output,
            scoring,
            "file:///my-recording.m4a".to_owned(),
            "안녕하세요".to_owned(),
            Voice::Female,
            Speed::Normal,
        );
        player.preload_reference(vec![0u8; 16]);
        player
    }

    #[tokio::test]
    async fn starting_one_source_stops_the_other_first() {
        let output = Arc::new(MockOutput::default());
        let mut player = build_player(Arc::clone(&output));

        player.play(PlaybackSource::MyRecording).await.unwrap();
        assert!(player.is_playing(PlaybackSource::MyRecording));

        player.play(PlaybackSource::Reference).await.unwrap();
        assert!(player.is_playing(PlaybackSource::Reference));
        assert!(!player.is_playing(PlaybackSource::MyRecording));

        assert_eq!(
            output.calls(),
            vec![
                Call::Play(PlaybackSource::MyRecording),
                Call::Stop(PlaybackSource::MyRecording),
                Call::Play(PlaybackSource::Reference),
            ]
        );
    }

    #[tokio::test]
    async fn never_reports_both_sources_playing() {
        let output = Arc::new(MockOutput::default());
        let mut player = build_player(output);

        for _ in 0..4 {
            player.play(PlaybackSource::MyRecording).await.unwrap();
            assert!(player.playing().is_some());
            player.play(PlaybackSource::Reference).await.unwrap();
            assert_eq!(player.playing(), Some(PlaybackSource::Reference));
        }
    }

    #[tokio::test]
    async fn playing_the_same_source_again_toggles_it_off() {
        let output = Arc::new(MockOutput::default());
        let mut player = build_player(Arc::clone(&output));

        player.play(PlaybackSource::MyRecording).await.unwrap();
        player.play(PlaybackSource::MyRecording).await.unwrap();
        assert_eq!(player.playing(), None);
        assert_eq!(
            output.calls(),
            vec![
                Call::Play(PlaybackSource::MyRecording),
                Call::Stop(PlaybackSource::MyRecording),
            ]
        );
    }

    #[tokio::test]
    async fn alternation_plays_recording_after_natural_completion() {
        let output = Arc::new(MockOutput::default());
        let mut player = build_player(Arc::clone(&output));

        player.play_alternating().await.unwrap();
        assert!(player.is_playing(PlaybackSource::Reference));

        player
            .notify_completed(PlaybackSource::Reference)
            .await
            .unwrap();
        assert!(player.is_playing(PlaybackSource::MyRecording));
        assert_eq!(
            output.calls(),
            vec![
                Call::Play(PlaybackSource::Reference),
                Call::Play(PlaybackSource::MyRecording),
            ]
        );
    }

    #[tokio::test]
    async fn manual_stop_cancels_the_followup() {
        let output = Arc::new(MockOutput::default());
        let mut player = build_player(Arc::clone(&output));

        player.play_alternating().await.unwrap();
        player.stop(PlaybackSource::Reference).await.unwrap();

        // a later natural completion of a manual replay must not chain
        player.play(PlaybackSource::Reference).await.unwrap();
        player
            .notify_completed(PlaybackSource::Reference)
            .await
            .unwrap();
        assert_eq!(player.playing(), None);
        assert!(!output.calls().contains(&Call::Play(PlaybackSource::MyRecording)));
    }

    #[tokio::test]
    async fn observers_see_discrete_transitions() {
        let output = Arc::new(MockOutput::default());
        let mut player = build_player(output);
        let log = Arc::new(EventLog::default());
        player.subscribe(Arc::clone(&log) as Arc<dyn PlaybackObserver>);

        player.play(PlaybackSource::MyRecording).await.unwrap();
        player.notify_position(PlaybackSource::MyRecording, 1_200);
        player
            .notify_completed(PlaybackSource::MyRecording)
            .await
            .unwrap();

        assert_eq!(
            log.events(),
            vec![
                PlaybackEvent::Started(PlaybackSource::MyRecording),
                PlaybackEvent::Position {
                    source: PlaybackSource::MyRecording,
                    position_ms: 1_200
                },
                PlaybackEvent::Completed(PlaybackSource::MyRecording),
            ]
        );
    }

    #[tokio::test]
    async fn reference_cache_is_reused() {
        let output = Arc::new(MockOutput::default());
        let mut player = build_player(output);

        // preloaded in build_player; ensure_reference must not hit the network
        let first = player.ensure_reference().await.unwrap();
        let second = player.ensure_reference().await.unwrap();
        match (&first, &second) {
            (
                AudioClip::Synthesized { bytes: a },
                AudioClip::Synthesized { bytes: b },
            ) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected synthesized clips"),
        }
    }
}
