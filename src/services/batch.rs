use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

/// Run `task` once for every id on a fixed pool of `workers` threads.
///
/// Workers pull the next index from a shared counter; each task answers on its
/// own channel, so results come back in input order no matter which worker ran
/// them or when. Returns after every task has finished.
pub fn run_batch<T, F>(ids: &[String], workers: usize, task: F) -> Vec<T>
where
    T: Send,
    F: Fn(&str) -> T + Sync,
{
    if ids.is_empty() {
        return Vec::new();
    }

    let (senders, receivers): (Vec<_>, Vec<_>) = ids.iter().map(|_| mpsc::channel::<T>()).unzip();
    let next = AtomicUsize::new(0);
    let workers = workers.min(ids.len()).max(1);

    thread::scope(|scope| {
        for _ in 0..workers {
            let (next, senders, task) = (&next, &senders, &task);
            scope.spawn(move || loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                if i >= ids.len() {
                    break;
                }
                let _ = senders[i].send(task(&ids[i]));
            });
        }
    });

    receivers
        .into_iter()
        .filter_map(|rx| rx.recv().ok())
        .collect()
}

/// Identifiers from a bulk file: one per line, blanks skipped.
pub fn parse_id_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
