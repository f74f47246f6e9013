//! Unit tests for linking domain values.

use crate::linking::domain::{
    CommentTemplate, LinkingDomainError, ProjectMembership, ProjectRef, PullRequest, SectionRef,
    TaskGid, Target, TrackedTask,
};
use rstest::{fixture, rstest};

#[fixture]
fn pull_request() -> PullRequest {
    PullRequest::new("https://github.com/acme/web/pull/42", "body")
        .with_number(42)
        .with_title("Fix login redirect")
}

#[rstest]
#[case("12345", "12345")]
#[case(" 987 ", "987")]
fn task_gid_accepts_digits(#[case] raw: &str, #[case] expected: &str) {
    let gid = TaskGid::new(raw).expect("numeric gid is valid");

    assert_eq!(gid.as_str(), expected);
    assert_eq!(gid.to_string(), expected);
}

#[rstest]
#[case("")]
#[case("abc")]
#[case("12-34")]
fn task_gid_rejects_non_numeric_values(#[case] raw: &str) {
    assert_eq!(
        TaskGid::new(raw),
        Err(LinkingDomainError::InvalidTaskGid(raw.to_owned()))
    );
}

#[test]
fn target_list_parses_in_input_order() {
    let targets = Target::parse_list(
        r#"[{"project":"Engineering","section":"In Review"},{"project":"QA","section":"Ready"}]"#,
    )
    .expect("valid target list");

    assert_eq!(targets.len(), 2);
    assert_eq!(targets.first().map(Target::project), Some("Engineering"));
    assert_eq!(targets.last().map(Target::section), Some("Ready"));
}

#[rstest]
#[case("")]
#[case("  \n")]
#[case("[]")]
fn blank_or_empty_target_list_yields_no_targets(#[case] raw: &str) {
    assert_eq!(Target::parse_list(raw), Ok(Vec::new()));
}

#[rstest]
#[case(r#"[{"project":"","section":"Done"}]"#)]
#[case(r#"[{"project":"Web","section":" "}]"#)]
#[case(r#"[{"project":"Web"}]"#)]
#[case(r#"{"project":"Web","section":"Done"}"#)]
fn malformed_target_list_is_rejected(#[case] raw: &str) {
    assert!(matches!(
        Target::parse_list(raw),
        Err(LinkingDomainError::InvalidTargets(_))
    ));
}

#[test]
fn target_rejects_blank_names() {
    assert_eq!(
        Target::new(" ", "Done"),
        Err(LinkingDomainError::EmptyTargetProject)
    );
    assert_eq!(
        Target::new("Web", ""),
        Err(LinkingDomainError::EmptyTargetSection("Web".to_owned()))
    );
}

#[rstest]
fn empty_template_renders_nothing(pull_request: PullRequest) {
    let template = CommentTemplate::new("  ");

    assert!(template.is_empty());
    assert_eq!(template.render(&pull_request), Ok(None));
}

#[rstest]
fn plain_template_gets_the_pull_request_url_appended(pull_request: PullRequest) {
    let template = CommentTemplate::new("Linked pull request:");

    assert_eq!(
        template.render(&pull_request),
        Ok(Some(
            "Linked pull request: https://github.com/acme/web/pull/42".to_owned()
        ))
    );
}

#[rstest]
fn jinja_template_sees_pull_request_fields(pull_request: PullRequest) {
    let template =
        CommentTemplate::new("PR #{{ pull_request.number }} ({{ pull_request.title }}): {{ pull_request.url }}");

    assert_eq!(
        template.render(&pull_request),
        Ok(Some(
            "PR #42 (Fix login redirect): https://github.com/acme/web/pull/42".to_owned()
        ))
    );
}

#[rstest]
fn broken_jinja_template_is_a_render_error(pull_request: PullRequest) {
    let template = CommentTemplate::new("PR {{ pull_request.url ");

    assert!(matches!(
        template.render(&pull_request),
        Err(LinkingDomainError::TemplateRender(_))
    ));
}

#[test]
fn membership_lookup_matches_project_by_name() {
    let gid = TaskGid::new("1").expect("valid gid");
    let task = TrackedTask::new(
        gid,
        vec![
            ProjectMembership {
                project: ProjectRef::new("100", "Engineering"),
                section: Some(SectionRef::new("101", "Backlog")),
            },
            ProjectMembership {
                project: ProjectRef::new("200", "QA"),
                section: None,
            },
        ],
    );

    let engineering = task.membership_in("Engineering").expect("member of Engineering");
    assert_eq!(
        engineering.section.as_ref().map(|section| section.name.as_str()),
        Some("Backlog")
    );
    assert!(task.membership_in("QA").is_some_and(|qa| qa.section.is_none()));
    assert!(task.membership_in("engineering").is_none());
}
