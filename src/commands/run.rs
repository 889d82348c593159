//! `proctree run` / `proctree demo`: drive a process tree from a plan.
//!
//! Each root task runs on its own thread. Leaves sleep through their duration
//! emitting their logs; composite tasks run their children sequentially or in
//! parallel and then settle on Success or Failed themselves.

use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use proctree::config::Config;
use proctree::ui::context::UiContext;
use proctree::{Plan, PlanTask, ProcTreeResult, ProcessTree, Progress, RefreshLoop, RefreshOptions};

pub fn cmd_run(plan_path: &Path, config: &Config, ui: &UiContext, width: Option<u16>) -> Result<()> {
    let plan = Plan::load(plan_path).with_context(|| format!("failed to load plan {}", plan_path.display()))?;
    execute(&plan, config, ui, width)
}

pub fn cmd_demo(config: &Config, ui: &UiContext, width: Option<u16>) -> Result<()> {
    execute(&Plan::sample(), config, ui, width)
}

fn execute(plan: &Plan, config: &Config, ui: &UiContext, width: Option<u16>) -> Result<()> {
    let tree = ProcessTree::new(plan.verb.clone(), plan.node_count(), plan.descriptors())
        .context("failed to build process tree")?
        .with_render_options(ui.render_options(config));

    {
        let tree = tree.clone();
        ctrlc::set_handler(move || tree.cancel()).context("failed to install ctrl+c handler")?;
    }

    let mut options = RefreshOptions {
        interval: config.tree.refresh_interval(),
        animate: ui.animation,
        ..RefreshOptions::default()
    };
    if let Some(width) = width {
        options = options.fixed_width(width);
    }
    let refresh = RefreshLoop::spawn(tree.clone(), options, io::stdout()).context("failed to start refresh loop")?;

    let workers: Vec<_> = plan
        .tasks
        .iter()
        .cloned()
        .map(|task| {
            let tree = tree.clone();
            thread::spawn(move || drive(&tree, &task))
        })
        .collect();

    let total = workers.len();
    let failed = workers
        .into_iter()
        .map(|worker| worker.join().unwrap_or(false))
        .filter(|ok| !ok)
        .count();

    refresh.stop();
    refresh.join().context("refresh loop failed")?;

    if tree.is_cancelled() {
        bail!("cancelled");
    }
    if failed > 0 {
        bail!("{failed} of {total} task group(s) failed");
    }
    Ok(())
}

/// Run `task` to completion and report whether it succeeded.
fn drive(tree: &ProcessTree, task: &PlanTask) -> bool {
    let key = task.key.as_str();
    if tree.is_cancelled() {
        report(tree.append_log(key, "cancelled"));
        return settle(tree, key, false);
    }
    report(tree.update_status(key, Progress::Running).map(drop));

    let ok = if task.children.is_empty() {
        work(tree, task)
    } else if task.parallel {
        thread::scope(|scope| {
            let handles: Vec<_> = task
                .children
                .iter()
                .map(|child| scope.spawn(move || drive(tree, child)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(false))
                .fold(true, |all, ok| all && ok)
        })
    } else {
        // Later steps stay pending once one fails.
        task.children.iter().all(|child| drive(tree, child))
    };

    settle(tree, key, ok && !task.fail)
}

fn work(tree: &ProcessTree, task: &PlanTask) -> bool {
    let key = task.key.as_str();
    let slice = Duration::from_millis(task.duration_ms) / (task.logs.len() as u32 + 1);

    for line in &task.logs {
        if tree.sleep_unless_cancelled(slice) {
            report(tree.append_log(key, "cancelled"));
            return false;
        }
        report(tree.append_log(key, line));
    }
    if tree.sleep_unless_cancelled(slice) {
        report(tree.append_log(key, "cancelled"));
        return false;
    }

    if task.fail {
        report(tree.append_log(key, "exited with status 1"));
    }
    !task.fail
}

fn settle(tree: &ProcessTree, key: &str, ok: bool) -> bool {
    let progress = if ok { Progress::Success } else { Progress::Failed };
    if tree.status_of(key) == Some(proctree::TaskStatus::Pending) {
        report(tree.update_status(key, Progress::Running).map(drop));
    }
    report(tree.update_status(key, progress).map(drop));
    ok
}

fn report(result: ProcTreeResult<()>) {
    if let Err(err) = result {
        tracing::warn!(error = %err, "process tree rejected update");
    }
}
