mod common;

use common::{counts, expected, write_log, SAMPLE_LINES};
use pretty_assertions::assert_eq;
use sitetail::tailer::tail_site;
use sitetail::{CancellationToken, Coordinator, SiteConfig, TailError};
use tempfile::tempdir;
use tracing::Dispatch;

fn coordinator() -> Coordinator {
    Coordinator::new(CancellationToken::new(), Dispatch::none())
}

#[test]
fn runs_every_site_and_keeps_configuration_order() {
    // Arrange
    let shop = tempdir().unwrap();
    let blog = tempdir().unwrap();
    write_log(shop.path(), "access.log", SAMPLE_LINES);
    write_log(blog.path(), "access.log", &["a b 302", "a b 302", "a b 404"]);
    let mut sites = vec![
        SiteConfig::new("shop", shop.path(), 2),
        SiteConfig::new("blog", blog.path(), 2),
    ];

    // Act
    let outcomes = coordinator().run(&mut sites).unwrap();

    // Assert
    let names: Vec<&str> = outcomes.iter().map(|o| o.site_name.as_str()).collect();
    assert_eq!(names, vec!["shop", "blog"]);
    assert_eq!(
        counts(outcomes[0].result.as_ref().unwrap()),
        expected(&[("2XX", 1), ("4XX", 1), ("5XX", 1)])
    );
    assert_eq!(
        counts(outcomes[1].result.as_ref().unwrap()),
        expected(&[("3XX", 2), ("4XX", 1)])
    );
    assert!(sites.iter().all(|s| s.current_row == 0));
}

#[test]
fn failing_site_does_not_affect_siblings() {
    // Arrange
    let shop = tempdir().unwrap();
    let empty = tempdir().unwrap();
    write_log(shop.path(), "access.log", SAMPLE_LINES);
    let mut sites = vec![
        SiteConfig::new("missing", shop.path().join("nope"), 2),
        SiteConfig::new("empty", empty.path(), 2),
        SiteConfig::new("shop", shop.path(), 2),
    ];
    sites[1].current_row = 9;

    // Act
    let outcomes = coordinator().run(&mut sites).unwrap();

    // Assert
    assert!(matches!(
        outcomes[0].result,
        Err(TailError::DirectoryUnreadable { .. })
    ));
    assert!(matches!(
        outcomes[1].result,
        Err(TailError::NoLogFileFound { .. })
    ));
    assert_eq!(outcomes[2].result.as_ref().unwrap().total(), 3);
    assert_eq!(sites[1].current_row, 9);
}

#[test]
fn cancelled_run_returns_empty_results_and_keeps_positions() {
    // Arrange
    let shop = tempdir().unwrap();
    write_log(shop.path(), "access.log", SAMPLE_LINES);
    let mut sites = vec![SiteConfig::new("shop", shop.path(), 2)];
    sites[0].current_row = 1;
    let coordinator = coordinator();
    coordinator.cancel_token().cancel();

    // Act
    let outcomes = coordinator.run(&mut sites).unwrap();

    // Assert
    assert!(outcomes[0]
        .result
        .as_ref()
        .unwrap()
        .counts_by_class
        .is_empty());
    assert_eq!(sites[0].current_row, 1);
}

#[test]
fn single_worker_still_drains_all_sites() {
    // Arrange
    let dirs: Vec<_> = (0..4).map(|_| tempdir().unwrap()).collect();
    let mut sites: Vec<SiteConfig> = dirs
        .iter()
        .enumerate()
        .map(|(i, dir)| {
            write_log(dir.path(), "access.log", &["GET / 200", "GET / 201"]);
            SiteConfig::new(format!("site{}", i), dir.path(), 2)
        })
        .collect();

    // Act
    let outcomes = coordinator().workers(Some(1)).run(&mut sites).unwrap();

    // Assert
    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        assert_eq!(
            counts(outcome.result.as_ref().unwrap()),
            expected(&[("2XX", 2)])
        );
    }
}

#[test]
fn no_sites_is_an_empty_run() {
    let outcomes = coordinator().run(&mut []).unwrap();
    assert!(outcomes.is_empty());
}

#[test]
fn panicking_site_is_reported_and_siblings_finish() {
    // Arrange
    let shop = tempdir().unwrap();
    let blog = tempdir().unwrap();
    write_log(shop.path(), "access.log", SAMPLE_LINES);
    write_log(blog.path(), "access.log", &["GET / 200"]);
    let mut sites = vec![
        SiteConfig::new("shop", shop.path(), 2),
        SiteConfig::new("broken", "unused", 2),
        SiteConfig::new("blog", blog.path(), 2),
    ];
    sites[1].current_row = 7;

    // Act
    let outcomes = coordinator()
        .run_with(&mut sites, |site, cancel| {
            if site.site_name == "broken" {
                panic!("tailer blew up");
            }
            tail_site(site, cancel)
        })
        .unwrap();

    // Assert
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].result.as_ref().unwrap().total(), 3);
    assert!(matches!(
        &outcomes[1].result,
        Err(TailError::Panicked { site }) if site == "broken"
    ));
    assert_eq!(
        counts(outcomes[2].result.as_ref().unwrap()),
        expected(&[("2XX", 1)])
    );
    assert_eq!(sites[1].current_row, 7);
}
