use std::thread;
use std::time::Duration;

use proctree::{ProcessTree, Progress, RenderOptions, TaskDescriptor, WaitOutcome};

const WORKERS: usize = 8;
const STEPS: usize = 50;

fn tree() -> ProcessTree {
    let roots = (0..WORKERS)
        .map(|w| {
            TaskDescriptor::new(format!("w{w}"), format!("worker {w}"))
                .with_child(TaskDescriptor::new(format!("w{w}-job"), "job"))
        })
        .collect();
    ProcessTree::new("crunching", WORKERS * 2, roots)
        .unwrap()
        .with_render_options(RenderOptions::plain())
}

#[test]
fn concurrent_writers_and_renderer_agree_on_the_final_state() {
    let tree = tree();

    let renderer = {
        let tree = tree.clone();
        thread::spawn(move || {
            let mut frames = 0;
            while tree.wait_timeout(Duration::from_millis(1)) != WaitOutcome::Done {
                tree.tick();
                let frame = tree.render(72).unwrap();
                assert!(frame.starts_with("crunching"));
                frames += 1;
            }
            frames
        })
    };

    let workers: Vec<_> = (0..WORKERS)
        .map(|w| {
            let tree = tree.clone();
            thread::spawn(move || {
                let root = format!("w{w}");
                let job = format!("w{w}-job");
                tree.update_status(&root, Progress::Running).unwrap();
                tree.update_status(&job, Progress::Running).unwrap();
                for step in 0..STEPS {
                    tree.append_log(&job, &format!("step {step}")).unwrap();
                    tree.set_right_text(&job, format!("{step}/{STEPS}")).unwrap();
                }
                let outcome = if w % 3 == 0 { Progress::Failed } else { Progress::Success };
                tree.update_status(&job, outcome).unwrap();
                tree.update_status(&root, outcome).unwrap();
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    renderer.join().unwrap();

    assert_eq!(tree.wait(), WaitOutcome::Done);
    assert_eq!(tree.finished_count(), WORKERS * 2);
    let snapshot = tree.snapshot();
    for w in 0..WORKERS {
        let job = snapshot.node(&format!("w{w}-job")).unwrap();
        assert_eq!(job.logs().len(), STEPS);
        assert_eq!(job.right_text(), format!("{}/{STEPS}", STEPS - 1));
    }

    let frame = tree.render(72).unwrap();
    let title = frame.lines().next().unwrap();
    assert!(title.ends_with(&format!("({0}/{0})", WORKERS * 2)), "{title}");
    assert!(!frame.contains("step 0"));
}
