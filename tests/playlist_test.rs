//! Playlist navigation and the post player's event dispatch.

mod common;

use common::{controller, test_settings, FakeSurface};
use video_post_player::constants::PLACEHOLDER_STREAM_URL;
use video_post_player::feed::Post;
use video_post_player::links::LinkMap;
use video_post_player::player::{
    AdaptiveLibrary, EndedOutcome, KeyInput, MediaEvent, PlayStart, PlaybackState,
    PlayRejection, PlaylistNavigator, PostPlayer, UiEvent,
};

fn streams(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://x/{i}.mp4")).collect()
}

fn post_with_streams(n: usize) -> Post {
    let mut post = Post::new(
        "clip",
        LinkMap::from_pairs([
            ("videy", streams(n)),
            ("mediafire", vec!["https://x/all.zip".to_string()]),
        ]),
    );
    post.thumb = Some("https://x/thumb.jpg".to_string());
    post
}

fn player(post: &Post, surface: FakeSurface) -> PostPlayer<FakeSurface> {
    PostPlayer::new(post, surface, AdaptiveLibrary::unavailable(), test_settings())
}

#[tokio::test]
async fn test_play_at_clamps_out_of_range_indices() {
    let nav = PlaylistNavigator::new(streams(3));
    let mut ctl = controller(FakeSurface::new());

    let nav_result = nav.play_at(&mut ctl, 7).await;
    assert_eq!(nav_result.index, 2);
    assert_eq!(nav_result.attach.url, "https://x/2.mp4");
    assert_eq!(ctl.ui().position.current, 3);
    assert_eq!(ctl.ui().position.total, 3);

    let nav_result = nav.play_at(&mut ctl, -4).await;
    assert_eq!(nav_result.index, 0);
    assert_eq!(ctl.session().index, 0);
}

#[tokio::test]
async fn test_play_at_waits_for_first_gesture() {
    let nav = PlaylistNavigator::new(streams(2));
    let mut ctl = controller(FakeSurface::new());

    let result = nav.play_at(&mut ctl, 1).await;
    assert!(result.play.is_none());
    assert!(ctl.surface().muted_at_play.is_empty());
    assert!(ctl.ui().overlay_visible);
    assert_eq!(ctl.state(), PlaybackState::Ready);

    ctl.mark_user_interaction();
    let result = nav.play_at(&mut ctl, 0).await;
    assert_eq!(result.play, Some(Ok(PlayStart::Unmuted)));
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[tokio::test]
async fn test_next_and_prev_stop_at_edges() {
    let nav = PlaylistNavigator::new(streams(2));
    let mut ctl = controller(FakeSurface::new());
    nav.load_initial(&mut ctl).await;

    assert!(nav.prev(&mut ctl).await.is_none());
    assert_eq!(nav.next(&mut ctl).await.map(|n| n.index), Some(1));
    assert!(nav.next(&mut ctl).await.is_none());
    assert_eq!(nav.prev(&mut ctl).await.map(|n| n.index), Some(0));
}

#[tokio::test]
async fn test_jump_to_is_one_based_and_reverts_invalid_input() {
    let nav = PlaylistNavigator::new(streams(3));
    let mut ctl = controller(FakeSurface::new());
    nav.load_initial(&mut ctl).await;

    let result = nav.jump_to(&mut ctl, "3").await.unwrap();
    assert_eq!(result.index, 2);

    for input in ["0", "4", "-1", "1.5", "abc", ""] {
        let err = nav.jump_to(&mut ctl, input).await.unwrap_err();
        assert_eq!(err.total, 3);
        assert_eq!(ctl.session().index, 2);
        assert_eq!(ctl.ui().position.current, 3);
    }
}

#[tokio::test]
async fn test_ended_advances_only_after_interaction() {
    let nav = PlaylistNavigator::new(streams(2));
    let mut ctl = controller(FakeSurface::new());
    nav.load_initial(&mut ctl).await;

    let outcome = nav.on_ended(&mut ctl).await;
    let EndedOutcome::Advanced(navigation) = outcome else {
        panic!("expected to advance");
    };
    assert_eq!(navigation.index, 1);
    assert!(navigation.play.is_none());
    assert!(ctl.ui().overlay_visible);
}

#[tokio::test]
async fn test_ended_on_last_item_stays_put() {
    let nav = PlaylistNavigator::new(streams(2));
    let mut ctl = controller(FakeSurface::new());
    ctl.mark_user_interaction();
    nav.play_at(&mut ctl, 1).await;

    assert_eq!(nav.on_ended(&mut ctl).await, EndedOutcome::Finished);
    assert_eq!(ctl.session().index, 1);
    assert!(ctl.ui().overlay_visible);
    assert_eq!(ctl.surface().sources[0].0, "https://x/1.mp4");
}

#[tokio::test]
async fn test_empty_playlist_loads_placeholder() {
    let nav = PlaylistNavigator::new(Vec::new());
    let mut ctl = controller(FakeSurface::new());

    let attach = nav.load_initial(&mut ctl).await;
    assert_eq!(attach.url, PLACEHOLDER_STREAM_URL);
    assert_eq!(ctl.ui().position.current, 0);
    assert_eq!(ctl.ui().position.total, 0);
}

#[tokio::test]
async fn test_post_player_start_is_paused_with_poster() {
    let post = post_with_streams(2);
    let mut player = player(&post, FakeSurface::new());
    player.start().await;

    let ctl = player.controller();
    assert_eq!(ctl.surface().poster.as_deref(), Some("https://x/thumb.jpg"));
    assert_eq!(ctl.surface().sources[0].0, "https://x/0.mp4");
    assert!(ctl.surface().muted_at_play.is_empty());
    assert!(ctl.ui().overlay_visible);
    assert_eq!(player.links().downloads.len(), 1);
    assert_eq!(player.playlist().len(), 2);
}

#[tokio::test]
async fn test_big_play_marks_interaction_and_plays() {
    let post = post_with_streams(2);
    let mut player = player(&post, FakeSurface::new());
    player.start().await;

    player.handle(UiEvent::BigPlay).await;

    let ctl = player.controller();
    assert!(ctl.session().user_interacted);
    assert!(ctl.ui().cinema);
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[tokio::test]
async fn test_big_play_loads_first_stream_when_nothing_attached() {
    let post = post_with_streams(2);
    let mut player = player(&post, FakeSurface::new());

    player.handle(UiEvent::BigPlay).await;

    let ctl = player.controller();
    assert_eq!(ctl.surface().sources[0].0, "https://x/0.mp4");
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[tokio::test]
async fn test_auto_advance_after_gesture() {
    let post = post_with_streams(3);
    let mut player = player(&post, FakeSurface::new());
    player.start().await;
    player.handle(UiEvent::PlayButton).await;

    player.handle(UiEvent::Media(MediaEvent::Ended)).await;

    let ctl = player.controller();
    assert_eq!(ctl.session().index, 1);
    assert_eq!(ctl.surface().sources[0].0, "https://x/1.mp4");
    assert_eq!(ctl.state(), PlaybackState::Playing);
    assert_eq!(ctl.surface().muted_at_play.len(), 2);
}

#[tokio::test]
async fn test_auto_advance_blocked_shows_overlay() {
    let post = post_with_streams(2);
    let mut surface = FakeSurface::new();
    // First play succeeds, both attempts on the next item are rejected.
    surface.play_results = [
        Ok(()),
        Err(PlayRejection::new("NotAllowedError")),
        Err(PlayRejection::new("NotAllowedError")),
    ]
    .into();
    let mut player = player(&post, surface);
    player.start().await;
    player.handle(UiEvent::PlayButton).await;

    player.handle(UiEvent::Media(MediaEvent::Ended)).await;

    let ctl = player.controller();
    assert_eq!(ctl.session().index, 1);
    assert_eq!(ctl.state(), PlaybackState::Blocked);
    assert!(ctl.ui().overlay_visible);
}

#[tokio::test]
async fn test_ui_events_route_to_controls() {
    let post = post_with_streams(3);
    let mut player = player(&post, FakeSurface::new());
    player.start().await;

    player.handle(UiEvent::PositionInput("3".to_string())).await;
    assert_eq!(player.controller().session().index, 2);
    player.handle(UiEvent::PositionInput("nope".to_string())).await;
    assert_eq!(player.controller().ui().position.current, 3);

    player.handle(UiEvent::Prev).await;
    assert_eq!(player.controller().session().index, 1);

    player.handle(UiEvent::VolumeSlider(30)).await;
    assert_eq!(player.controller().ui().volume_slider, 30);

    player.handle(UiEvent::MuteButton).await;
    assert!(player.controller().surface().muted);

    player.handle(UiEvent::Speed).await;
    assert_eq!(player.controller().ui().speed_label, "1.25×");

    player.handle(UiEvent::HighestQuality(true)).await;
    assert!(player.controller().ui().prefer_highest_quality);

    player.handle(UiEvent::Key(KeyInput::new("t"))).await;
    assert!(player.controller().ui().cinema);
}

#[tokio::test]
async fn test_surface_click_toggles_playback() {
    let post = post_with_streams(1);
    let mut player = player(&post, FakeSurface::new());
    player.start().await;

    player.handle(UiEvent::SurfaceClick).await;
    assert_eq!(player.controller().state(), PlaybackState::Playing);

    player.handle(UiEvent::SurfaceClick).await;
    assert_eq!(player.controller().state(), PlaybackState::Paused);
}
