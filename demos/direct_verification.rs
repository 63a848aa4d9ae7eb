//! Building a [Task] and a certificate directly in memory (rather than
//! from files) and replaying it through [driver::run], mirroring the
//! S2 scenario from spec.md §8: an unreachable single-fact task, proven
//! unsolvable via progression over the empty action set plus the two
//! basic-subset rules.

use planproof::config::Config;
use planproof::driver::{self, Verdict};
use planproof::task::Task;

fn main() {
    // One fact, no actions, initial `¬p`, goal `{p}`: unreachable.
    let task = Task::new(1, vec![], vec![false], vec![1]).expect("valid task");

    let certificate = "\
        e 0 c i\n\
        a 0 a\n\
        e 1 p 0 0\n\
        e 2 c e\n\
        e 3 u 0 2\n\
        e 4 c g\n\
        e 5 i 0 4\n\
        k 0 s 1 3 b2\n\
        k 1 d 2 ed\n\
        k 2 s 5 2 b1\n\
        k 3 d 5 sd 2 1\n\
        k 4 d 0 pg 0 1 3\n\
        k 5 u ci 4\n";

    let verdict = driver::run(&task, certificate, &Config::default()).expect("certificate replays cleanly");
    println!("verdict: {verdict:?}");
    assert_eq!(verdict, Verdict::UnsolvableProven);

    // A malformed certificate fails closed rather than panicking.
    let bad_certificate = "e 0 c i\nk 0 u ci 0\n";
    let verdict = driver::run(&task, bad_certificate, &Config::default()).expect("bad claims are rejected, not errors");
    println!("bad certificate verdict: {verdict:?}");
    assert_eq!(verdict, Verdict::NotProven);
}
