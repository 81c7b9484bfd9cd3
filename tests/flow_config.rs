// tests/flow_config.rs

//! Configuration errors abort the run before anything executes, and the
//! driver-facing surfaces (task listing, report) render what ran.

use flowdag::cli::CliArgs;
use flowdag::driver::{run_with, write_task_list};
use flowdag::engine::write_report;
use flowdag::{Flow, FlowError, Task};
use flowdag_test_utils::init_tracing;
use flowdag_test_utils::probe::{recording_task, RunProbe};

#[test]
fn duplicate_registration_is_rejected() {
    init_tracing();

    let mut flow = Flow::new();
    flow.register(Task::new("build")).unwrap();
    let err = flow.register(Task::new("build")).unwrap_err();
    assert!(matches!(err, FlowError::DuplicateTask(name) if name == "build"));
}

#[test]
fn empty_task_name_is_rejected() {
    init_tracing();

    let mut flow = Flow::new();
    let err = flow.register(Task::new("")).unwrap_err();
    assert!(matches!(err, FlowError::EmptyTaskName));
}

#[test]
fn unknown_requested_name_runs_nothing() {
    init_tracing();

    let probe = RunProbe::new();
    let mut flow = Flow::new();
    flow.register(recording_task("a", &probe)).unwrap();

    let err = flow.run(&["a", "nope"]).unwrap_err();

    assert!(matches!(err, FlowError::UnknownTask(name) if name == "nope"));
    assert!(
        probe.executed().is_empty(),
        "a configuration error must not execute any task"
    );
}

#[test]
fn empty_request_without_default_is_an_error() {
    init_tracing();

    let mut flow = Flow::new();
    flow.register(Task::new("a")).unwrap();

    let err = flow.run::<&str>(&[]).unwrap_err();
    assert!(matches!(err, FlowError::NoDefaultTask));
}

#[test]
fn handle_from_another_flow_is_rejected_at_registration() {
    init_tracing();

    let mut other = Flow::new();
    let foreign = other.register(Task::new("clean")).unwrap();

    let mut flow = Flow::new();
    let err = flow.register(Task::new("build").deps([foreign])).unwrap_err();
    assert!(matches!(err, FlowError::ForeignDependency(name) if name == "build"));
}

#[test]
fn task_listing_keeps_registration_order() {
    init_tracing();

    let mut flow = Flow::new();
    flow.register(Task::new("clean").usage("remove git ignored files"))
        .unwrap();
    flow.register(Task::new("build").usage("compile everything"))
        .unwrap();
    flow.register(Task::new("all")).unwrap();

    let mut out = Vec::new();
    write_task_list(&mut out, &flow).unwrap();
    let text = String::from_utf8(out).unwrap();

    let clean_at = text.find("clean").unwrap();
    let build_at = text.find("build").unwrap();
    let all_at = text.find("all").unwrap();
    assert!(clean_at < build_at && build_at < all_at);
    assert!(text.contains("remove git ignored files"));
    assert!(text.contains("compile everything"));
}

#[test]
fn report_lists_every_planned_task() {
    init_tracing();

    let mut flow = Flow::new();
    let ok = flow
        .register(Task::new("ok").action(|ctx| {
            ctx.log("fine");
            Ok(())
        }))
        .unwrap();
    let bad = flow
        .register(
            Task::new("bad")
                .deps([ok])
                .action(|ctx| ctx.fatal("broken")),
        )
        .unwrap();
    flow.register(Task::new("after").deps([bad])).unwrap();

    let summary = flow.run(&["after"]).unwrap();

    let mut out = Vec::new();
    write_report(&mut out, &summary, false).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("----- PASS: ok"));
    assert!(text.contains("----- FAIL: bad"));
    assert!(text.contains("----- NOT RUN: after"));
    // Quiet mode: only the failed task's output is shown.
    assert!(!text.contains("fine"));
    assert!(text.contains("Fatal: broken"));
    assert!(text.contains("failed"));

    let mut out = Vec::new();
    write_report(&mut out, &summary, true).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("===== TASK  ok"));
    assert!(text.contains("fine"));
}

fn args_for(tasks: &[&str]) -> CliArgs {
    CliArgs {
        tasks: tasks.iter().map(|s| s.to_string()).collect(),
        verbose: false,
        list: false,
        log_level: None,
    }
}

#[test]
fn driver_fails_when_a_task_fails() {
    init_tracing();

    let mut flow = Flow::new();
    flow.register(Task::new("bad").action(|ctx| ctx.fatal("broken")))
        .unwrap();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let ok = run_with(&flow, &args_for(&["bad"]), &mut out, &mut err);

    assert!(!ok);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("----- FAIL: bad"));
    assert!(err.is_empty());
}

#[test]
fn driver_prints_usage_on_configuration_error() {
    init_tracing();

    let probe = RunProbe::new();
    let mut flow = Flow::new();
    flow.register(recording_task("build", &probe).usage("compile everything"))
        .unwrap();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let ok = run_with(&flow, &args_for(&["nope"]), &mut out, &mut err);

    assert!(!ok);
    assert!(probe.executed().is_empty());
    let text = String::from_utf8(err).unwrap();
    assert!(text.contains("unknown task 'nope'"));
    assert!(text.contains("compile everything"));
}

#[test]
fn driver_list_mode_prints_tasks_without_running_them() {
    init_tracing();

    let probe = RunProbe::new();
    let mut flow = Flow::new();
    flow.register(recording_task("build", &probe)).unwrap();

    let mut args = args_for(&[]);
    args.list = true;

    let mut out = Vec::new();
    let mut err = Vec::new();
    let ok = run_with(&flow, &args, &mut out, &mut err);

    assert!(ok);
    assert!(probe.executed().is_empty());
    assert!(String::from_utf8(out).unwrap().contains("build"));
}

#[test]
fn flow_is_reusable_across_runs() {
    init_tracing();

    let probe = RunProbe::new();
    let mut flow = Flow::new();
    flow.register(recording_task("a", &probe)).unwrap();

    flow.run(&["a"]).unwrap();
    flow.run(&["a"]).unwrap();

    // Each run starts fresh: memoization is per run, not per flow.
    assert_eq!(probe.executed(), ["a", "a"]);
}
