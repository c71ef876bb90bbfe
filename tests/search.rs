use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tron_vanity::crypto::Address;
use tron_vanity::{
    FileSink, Limit, Pattern, ResultSink, SearchError, SearchGoal, VanityResult, WorkerPool,
};

#[derive(Clone, Default)]
struct Collect {
    results: Arc<Mutex<Vec<VanityResult>>>,
    delay: Duration,
}

impl Collect {
    fn slow(delay: Duration) -> Self {
        Self {
            results: Arc::default(),
            delay,
        }
    }

    fn results(&self) -> Vec<VanityResult> {
        self.results.lock().unwrap().clone()
    }
}

impl ResultSink for Collect {
    fn emit(&mut self, result: &VanityResult) -> io::Result<()> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.results.lock().unwrap().push(result.clone());
        Ok(())
    }
}

#[test]
fn goal_is_never_exceeded_with_many_workers() {
    // Every address starts with T, so every worker races to admit a result.
    let sink = Collect::slow(Duration::from_millis(5));
    let goal = SearchGoal::new(Pattern::prefix_suffix("T", ""), Limit::Matches(5));
    let pool = WorkerPool::new(16, goal, Box::new(sink.clone())).unwrap();

    let summary = pool.join().unwrap();

    assert_eq!(summary.matches, 5);
    assert_eq!(sink.results().len(), 5);
    assert!(summary.attempts >= 5);
}

#[test]
fn single_match_goal_terminates_with_one_result() {
    let sink = Collect::default();
    let goal = SearchGoal::new(Pattern::RepeatedSuffix(1), Limit::Matches(1));
    let summary = WorkerPool::new(4, goal, Box::new(sink.clone()))
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(summary.matches, 1);
    let results = sink.results();
    assert_eq!(results.len(), 1);
    assert!(results[0].address.starts_with('T'));
    assert_eq!(results[0].private_key.len(), 64);
}

#[test]
fn emitted_addresses_round_trip_and_match() {
    let sink = Collect::default();
    let goal = SearchGoal::new(Pattern::Unconditional, Limit::Attempts(50));
    let summary = WorkerPool::new(3, goal, Box::new(sink.clone()))
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(summary.attempts, 50);
    let results = sink.results();
    assert_eq!(results.len(), 50);

    for result in &results {
        let address = Address::from_base58(&result.address).unwrap();
        assert_eq!(address.as_str(), result.address);

        let secret: [u8; 32] = hex::decode(&result.private_key)
            .unwrap()
            .try_into()
            .unwrap();
        let keypair = tron_vanity::Keypair::from_secret_bytes(secret).unwrap();
        assert_eq!(keypair.address(), &address);
    }
}

#[test]
fn similarity_scores_strictly_increase() {
    let sink = Collect::default();
    let reference = "TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HC";
    let goal = SearchGoal::new(Pattern::similarity(reference), Limit::Unbounded);
    let pool = WorkerPool::new(2, goal, Box::new(sink.clone())).unwrap();

    thread::sleep(Duration::from_millis(200));
    pool.stop();
    let summary = pool.join().unwrap();

    let scores: Vec<f64> = sink.results().iter().map(|r| r.score.unwrap()).collect();
    assert!(!scores.is_empty());
    assert!(scores.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(summary.best_score, *scores.last().unwrap());
    assert_eq!(summary.matches, scores.len() as u64);
}

#[test]
fn batch_writes_exact_record_count() {
    let path = std::env::temp_dir().join(format!("tron_vanity_batch_{}.txt", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let goal = SearchGoal::new(Pattern::Unconditional, Limit::Attempts(20));
    let sink = FileSink::open(&path).unwrap();
    let summary = WorkerPool::new(4, goal, Box::new(sink)).unwrap().join().unwrap();
    assert_eq!(summary.matches, 20);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 40);
    for record in lines.chunks(2) {
        let address = record[0].strip_prefix("address: ").unwrap();
        let key = record[1].strip_prefix("private key: ").unwrap();
        assert!(Address::from_base58(address).is_ok());
        assert_eq!(key.len(), 64);
    }

    std::fs::remove_file(&path).unwrap();
}

struct Failing;

impl ResultSink for Failing {
    fn emit(&mut self, _result: &VanityResult) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "write refused"))
    }
}

#[test]
fn sink_failure_aborts_search() {
    let goal = SearchGoal::new(Pattern::Unconditional, Limit::Unbounded);
    let err = WorkerPool::new(4, goal, Box::new(Failing))
        .unwrap()
        .join()
        .unwrap_err();
    assert!(matches!(err, SearchError::Sink(_)));
}
