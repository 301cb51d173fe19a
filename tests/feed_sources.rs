// tests/feed_sources.rs
use std::fs;
use std::path::PathBuf;

use lands_scrape::config::options::{FeedSource, RunOptions};
use lands_scrape::progress::Progress;
use lands_scrape::{runner, store, Error};

const DOC: &str = r#"{
  "me.angeschossen.lands": {
    "label": "Lands",
    "markers": {
      "land_7": {
        "type": "extrude",
        "label": "Stonehaven",
        "position": { "x": 120.5, "y": 64, "z": -40 },
        "shape": [ { "x": 112, "z": -48 }, { "x": 128, "z": -48 }, { "x": 128, "z": -32 }, { "x": 112, "z": -32 } ],
        "detail": "<div><b>Level:</b> Town</div><div><b>Balance:</b> $2,500.00</div><div><b>Chunks:</b> 1</div><div><b>Players (1):</b> Ann</div><div>This land belongs to nation Rathnir:</div><div><b>Level:</b> Kingdom</div><div><b>Capital:</b> Stonehaven</div>"
      }
    }
  }
}"#;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("lands_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn file_source() {
    let dir = tmp_dir("file");
    let input = dir.join("markers_dump.json");
    fs::write(&input, DOC).unwrap();

    let opts = RunOptions {
        source: FeedSource::File(input),
        store_dir: dir.join(".store"),
        ..RunOptions::default()
    };
    let report = runner::run(&opts, None).unwrap();

    assert_eq!(report.summary.total_territories, 1);
    assert_eq!(report.summary.total_balance, 2500.0);
    assert_eq!(report.data.nations[0].capital.as_deref(), Some("Stonehaven"));
    // Only fetched feeds are cached
    assert!(!store::feed_path(&opts.store_dir).exists());
}

#[test]
fn cache_source_replays_saved_feed() {
    let dir = tmp_dir("cache");
    store::save_feed(&dir, DOC).unwrap();

    let opts = RunOptions { source: FeedSource::Cache, store_dir: dir, ..RunOptions::default() };
    let report = runner::run(&opts, None).unwrap();

    let t = &report.data.territories[0];
    assert_eq!(t.name, "Stonehaven");
    assert_eq!(t.shape_area(), 256.0);
    assert_eq!(report.data.coordinates.len(), 4);
    assert!(report.summary.coordinate_validation);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tmp_dir("missing");
    let opts = RunOptions {
        source: FeedSource::File(dir.join("nope.json")),
        store_dir: dir.clone(),
        ..RunOptions::default()
    };
    assert!(matches!(runner::run(&opts, None), Err(Error::Io { .. })));

    let opts = RunOptions { source: FeedSource::Cache, store_dir: dir, ..RunOptions::default() };
    assert!(matches!(runner::run(&opts, None), Err(Error::Io { .. })));
}

#[derive(Default)]
struct Count {
    begun: Option<usize>,
    done: usize,
}

impl Progress for Count {
    fn begin(&mut self, total: usize) { self.begun = Some(total); }
    fn item_done(&mut self, _id: &str) { self.done += 1; }
}

#[test]
fn progress_gets_exact_total() {
    let dir = tmp_dir("progress");
    store::save_feed(&dir, DOC).unwrap();
    let opts = RunOptions { source: FeedSource::Cache, store_dir: dir, ..RunOptions::default() };

    let mut count = Count::default();
    runner::run(&opts, Some(&mut count)).unwrap();
    assert_eq!(count.begun, Some(1));
    assert_eq!(count.done, 1);
}
