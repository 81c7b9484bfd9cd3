// tests/run_statuses.rs

use flowdag::{Flow, Task, TaskStatus};
use flowdag_test_utils::init_tracing;
use flowdag_test_utils::probe::{recording_task, RunProbe};

#[test]
fn error_continues_the_action_but_fails_the_task() {
    init_tracing();

    let probe = RunProbe::new();
    let mut flow = Flow::new();
    let lint = {
        let probe = probe.clone();
        flow.register(Task::new("lint").action(move |ctx| {
            ctx.error("first problem");
            ctx.error("second problem");
            probe.record("lint-end");
            Ok(())
        }))
        .unwrap()
    };
    flow.register(recording_task("release", &probe).deps([lint]))
        .unwrap();

    let summary = flow.run(&["release"]).unwrap();

    // The action ran to its end despite the errors.
    assert_eq!(probe.executed(), ["lint-end"]);

    let lint_result = summary.result("lint").unwrap();
    assert_eq!(lint_result.status, TaskStatus::Failed);
    assert!(lint_result.output.contains("first problem"));
    assert!(lint_result.output.contains("second problem"));

    // A failed dependency blocks the dependent, exactly like fatal.
    assert_eq!(summary.result("release").unwrap().status, TaskStatus::NotRun);
    assert!(summary.failed());
}

#[test]
fn fatal_stops_the_action_and_unrelated_tasks_still_run() {
    init_tracing();

    let probe = RunProbe::new();
    let mut flow = Flow::new();
    let install = {
        let probe = probe.clone();
        flow.register(Task::new("install").action(move |ctx| {
            probe.record("install-before");
            ctx.fatal("tool missing")?;
            probe.record("install-after");
            Ok(())
        }))
        .unwrap()
    };
    flow.register(recording_task("build", &probe).deps([install]))
        .unwrap();
    flow.register(recording_task("docs", &probe)).unwrap();

    let summary = flow.run(&["build", "docs"]).unwrap();

    // Code after fatal never ran; the unrelated task did.
    assert_eq!(probe.executed(), ["install-before", "docs"]);

    assert_eq!(summary.result("install").unwrap().status, TaskStatus::Failed);
    assert_eq!(summary.result("build").unwrap().status, TaskStatus::NotRun);
    assert_eq!(summary.result("docs").unwrap().status, TaskStatus::Passed);
    assert!(summary.failed());
}

#[test]
fn skip_does_not_block_dependents_or_fail_the_run() {
    init_tracing();

    let probe = RunProbe::new();
    let mut flow = Flow::new();
    let diff = flow
        .register(Task::new("diff").action(|ctx| {
            ctx.skip("ci param is not set, skipping")?;
            unreachable!("skip must end the action");
        }))
        .unwrap();
    flow.register(recording_task("summary", &probe).deps([diff]))
        .unwrap();

    let summary = flow.run(&["summary"]).unwrap();

    assert_eq!(summary.result("diff").unwrap().status, TaskStatus::Skipped);
    assert_eq!(summary.result("summary").unwrap().status, TaskStatus::Passed);
    assert_eq!(probe.executed(), ["summary"]);
    assert!(!summary.failed());
}

#[test]
fn failure_propagates_transitively_through_not_run_tasks() {
    init_tracing();

    let probe = RunProbe::new();
    let mut flow = Flow::new();
    let clean = flow.register(recording_task("clean", &probe)).unwrap();
    let build = {
        let probe = probe.clone();
        flow.register(
            Task::new("build")
                .deps([clean])
                .action(move |ctx| {
                    probe.record("build");
                    ctx.fatal("compiler exploded")
                }),
        )
        .unwrap()
    };
    let test = flow
        .register(recording_task("test", &probe).deps([build]))
        .unwrap();
    flow.register(Task::new("all").deps([build, test])).unwrap();

    let summary = flow.run(&["all"]).unwrap();

    assert_eq!(probe.executed(), ["clean", "build"]);
    assert_eq!(summary.result("clean").unwrap().status, TaskStatus::Passed);
    assert_eq!(summary.result("build").unwrap().status, TaskStatus::Failed);
    assert_eq!(summary.result("test").unwrap().status, TaskStatus::NotRun);
    assert_eq!(summary.result("all").unwrap().status, TaskStatus::NotRun);
    assert!(summary.failed());
}

#[test]
fn grouping_task_without_action_passes() {
    init_tracing();

    let probe = RunProbe::new();
    let mut flow = Flow::new();
    let a = flow.register(recording_task("a", &probe)).unwrap();
    flow.register(Task::new("group").deps([a])).unwrap();

    let summary = flow.run(&["group"]).unwrap();

    assert_eq!(summary.result("group").unwrap().status, TaskStatus::Passed);
    assert!(!summary.failed());
}

#[test]
fn error_before_skip_still_counts_as_failed() {
    init_tracing();

    let mut flow = Flow::new();
    flow.register(Task::new("check").action(|ctx| {
        ctx.error("found a problem");
        ctx.skip("but tried to bail out politely")
    }))
    .unwrap();

    let summary = flow.run(&["check"]).unwrap();

    assert_eq!(summary.result("check").unwrap().status, TaskStatus::Failed);
    assert!(summary.failed());
}

#[test]
fn log_output_is_captured_in_order() {
    init_tracing();

    let mut flow = Flow::new();
    flow.register(Task::new("hi").action(|ctx| {
        ctx.log("one");
        ctx.log("two");
        Ok(())
    }))
    .unwrap();

    let summary = flow.run(&["hi"]).unwrap();

    assert_eq!(summary.result("hi").unwrap().output, "one\ntwo\n");
}
