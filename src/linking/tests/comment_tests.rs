//! Tests for comment posting and duplicate detection.

use std::sync::Arc;

use super::tracker_fixtures::{FIRST_TASK, task, tracker};
use crate::linking::{
    adapters::memory::{InMemoryTaskTracker, TrackerCall},
    domain::TaskComment,
    ports::MockTaskTracker,
    services::{CommentAppender, CommentOutcome, CommentPolicy},
};
use rstest::rstest;

const COMMENT: &str = "Linked pull request: https://github.com/acme/web/pull/42";

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
#[tokio::test(flavor = "multi_thread")]
async fn missing_comment_is_a_no_op_without_calls(#[case] text: Option<&str>) {
    let mut mock = MockTaskTracker::new();
    mock.expect_list_comments().times(0);
    mock.expect_add_comment().times(0);
    let appender = CommentAppender::new(Arc::new(mock), CommentPolicy::skip_duplicates());

    let outcome = appender.append(&task(FIRST_TASK), text).await;

    assert!(matches!(outcome, CommentOutcome::NoOp));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn posts_twice_without_duplicate_detection(tracker: InMemoryTaskTracker) {
    let shared = Arc::new(tracker);
    let appender = CommentAppender::new(Arc::clone(&shared), CommentPolicy::always_post());

    let first = appender.append(&task(FIRST_TASK), Some(COMMENT)).await;
    let second = appender.append(&task(FIRST_TASK), Some(COMMENT)).await;

    assert_eq!((first.as_str(), second.as_str()), ("posted", "posted"));
    assert_eq!(
        shared.comments_on(&task(FIRST_TASK)).expect("comments readable"),
        vec![COMMENT, COMMENT]
    );
    let calls = shared.calls().expect("calls recorded");
    assert!(!calls.contains(&TrackerCall::ListComments(task(FIRST_TASK))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn skips_the_second_post_with_duplicate_detection(tracker: InMemoryTaskTracker) {
    let shared = Arc::new(tracker);
    let appender = CommentAppender::new(Arc::clone(&shared), CommentPolicy::skip_duplicates());

    let first = appender.append(&task(FIRST_TASK), Some(COMMENT)).await;
    let second = appender.append(&task(FIRST_TASK), Some(COMMENT)).await;

    assert_eq!(
        (first.as_str(), second.as_str()),
        ("posted", "skipped_duplicate")
    );
    assert_eq!(
        shared.comments_on(&task(FIRST_TASK)).expect("comments readable"),
        vec![COMMENT]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn similar_but_different_text_is_not_a_duplicate(tracker: InMemoryTaskTracker) {
    tracker
        .add_existing_comment(&task(FIRST_TASK), format!("{COMMENT} (draft)"))
        .expect("seed comment");
    let shared = Arc::new(tracker);
    let appender = CommentAppender::new(Arc::clone(&shared), CommentPolicy::skip_duplicates());

    let outcome = appender.append(&task(FIRST_TASK), Some(COMMENT)).await;

    assert!(matches!(outcome, CommentOutcome::Posted));
    assert_eq!(
        shared
            .comments_on(&task(FIRST_TASK))
            .expect("comments readable")
            .len(),
        2
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn existing_identical_comment_prevents_posting() {
    let mut mock = MockTaskTracker::new();
    mock.expect_list_comments()
        .times(1)
        .returning(|_| Ok(vec![TaskComment::new("older note"), TaskComment::new(COMMENT)]));
    mock.expect_add_comment().times(0);
    let appender = CommentAppender::new(Arc::new(mock), CommentPolicy::skip_duplicates());

    let outcome = appender.append(&task(FIRST_TASK), Some(COMMENT)).await;

    assert!(matches!(outcome, CommentOutcome::SkippedDuplicate));
}

#[tokio::test(flavor = "multi_thread")]
async fn posts_the_exact_text() {
    let mut mock = MockTaskTracker::new();
    mock.expect_list_comments().times(0);
    mock.expect_add_comment()
        .withf(|gid, text| gid.as_str() == FIRST_TASK && text == COMMENT)
        .times(1)
        .returning(|_, _| Ok(()));
    let appender = CommentAppender::new(Arc::new(mock), CommentPolicy::always_post());

    let outcome = appender.append(&task(FIRST_TASK), Some(COMMENT)).await;

    assert!(matches!(outcome, CommentOutcome::Posted));
    assert!(!appender.policy().skip_duplicates);
}

#[rstest]
#[case(CommentPolicy::always_post())]
#[case(CommentPolicy::skip_duplicates())]
#[tokio::test(flavor = "multi_thread")]
async fn remote_failure_is_reported_not_raised(
    tracker: InMemoryTaskTracker,
    #[case] policy: CommentPolicy,
) {
    tracker
        .fail_comments_for(task(FIRST_TASK))
        .expect("inject failure");
    let appender = CommentAppender::new(Arc::new(tracker), policy);

    let outcome = appender.append(&task(FIRST_TASK), Some(COMMENT)).await;

    assert!(outcome.is_error());
}
