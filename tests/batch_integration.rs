//! End-to-end scoring over temporary tree directories.

use family_precision::{
    Error, LeafClassifier, NoPairsPolicy, OutgroupFreePolicy, ScoringConfig, SpeciesProfile,
    score_directory,
};
use std::fs;
use std::path::Path;
use std::process::Command;

const PROFILE: &str = "hsa\t2\nptr 1\nmmu   1\ndme 0\ncel 0\n";

/// Write the family trees used throughout these tests.
///
/// - fam_a: 1 of 3 pairs clean -> 1/3
/// - fam_b: every ingroup pair below an outgroup-free clade -> 1.0
/// - fam_c: no outgroup at all -> 0 by default
/// - fam_d: single ingroup leaf -> no pairs
fn write_families(dir: &Path) {
    fs::write(
        dir.join("fam_a.nwk"),
        "((hsa_1:0.1,ptr_1:0.1)90:0.1,(mmu_1:0.1,dme_1:0.1)80:0.1);\n",
    )
    .unwrap();
    fs::write(
        dir.join("fam_b.nwk"),
        "(((hsa_1:0.1,hsa_2:0.1):0.1,ptr_1:0.1):0.1,(dme_1:0.1,cel_1:0.1):0.1);\n",
    )
    .unwrap();
    fs::write(dir.join("fam_c.nwk"), "((hsa_1:0.1,ptr_1:0.1):0.1,mmu_1:0.1);\n").unwrap();
    fs::write(dir.join("fam_d.nwk"), "((hsa_1:0.1,dme_1:0.1):0.1,cel_1:0.1);\n").unwrap();
}

fn run(dir: &Path, config: &ScoringConfig) -> Result<Vec<(String, f64)>, Error> {
    let profile: SpeciesProfile = PROFILE.parse().unwrap();
    let classifier = LeafClassifier::new(&profile, config.match_mode).unwrap();
    let mut scores = Vec::new();
    score_directory(dir, &classifier, config, |s| {
        scores.push((s.family.clone(), s.precision));
        Ok(())
    })?;
    Ok(scores)
}

#[test]
fn scores_every_family_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    write_families(dir.path());

    let scores = run(dir.path(), &ScoringConfig::default()).unwrap();
    let names: Vec<&str> = scores.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["fam_a", "fam_b", "fam_c", "fam_d"]);

    assert!((scores[0].1 - 1.0 / 3.0).abs() <= f64::EPSILON);
    assert_eq!(scores[1].1, 1.0);
    // outgroup-free tree keeps the reference behavior of scoring 0
    assert_eq!(scores[2].1, 0.0);
    assert!(scores[3].1.is_nan());
}

#[test]
fn skip_policies_drop_lines() {
    let dir = tempfile::tempdir().unwrap();
    write_families(dir.path());

    let config = ScoringConfig {
        outgroup_free: OutgroupFreePolicy::Skip,
        no_pairs: NoPairsPolicy::Skip,
        ..Default::default()
    };
    let scores = run(dir.path(), &config).unwrap();
    let names: Vec<&str> = scores.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["fam_a", "fam_b"]);
}

#[test]
fn malformed_tree_aborts_unless_keep_going() {
    let dir = tempfile::tempdir().unwrap();
    write_families(dir.path());
    // an empty tree file between fam_b and fam_c
    fs::write(dir.path().join("fam_bb.nwk"), "  \n").unwrap();

    let profile: SpeciesProfile = PROFILE.parse().unwrap();
    let classifier = LeafClassifier::new(&profile, Default::default()).unwrap();

    let mut seen = Vec::new();
    let err = score_directory(dir.path(), &classifier, &ScoringConfig::default(), |s| {
        seen.push(s.family.clone());
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(err, Error::Newick { .. }));
    // lines before the failure were already emitted
    assert_eq!(seen, vec!["fam_a", "fam_b"]);

    let config = ScoringConfig { keep_going: true, ..Default::default() };
    let mut seen = Vec::new();
    let summary = score_directory(dir.path(), &classifier, &config, |s| {
        seen.push(s.family.clone());
        Ok(())
    })
    .unwrap();
    assert_eq!(seen, vec!["fam_a", "fam_b", "fam_c", "fam_d"]);
    assert_eq!(summary.files, 5);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.scored, 2);
    assert_eq!(summary.outgroup_free, 1);
    assert_eq!(summary.without_pairs, 1);
}

#[test]
fn rerun_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_families(dir.path());

    let first = run(dir.path(), &ScoringConfig::default()).unwrap();
    let second = run(dir.path(), &ScoringConfig::default()).unwrap();

    let render = |scores: &[(String, f64)]| {
        scores.iter().map(|(n, p)| format!("{n} {p:?}")).collect::<Vec<_>>()
    };
    assert_eq!(render(&first), render(&second));
}

#[test]
fn cli_prints_one_line_per_tree() {
    let dir = tempfile::tempdir().unwrap();
    let trees = dir.path().join("trees");
    fs::create_dir(&trees).unwrap();
    write_families(&trees);
    let profile = dir.path().join("species.profile");
    fs::write(&profile, PROFILE).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_family-precision"))
        .arg(&trees)
        .arg(&profile)
        .arg("--quiet")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["fam_a 0.3333333333333333", "fam_b 1.0", "fam_c 0.0", "fam_d NaN"]
    );
}

#[test]
fn cli_fails_on_bad_profile() {
    let dir = tempfile::tempdir().unwrap();
    write_families(dir.path());
    let profile = dir.path().join("bad.profile");
    fs::write(&profile, "hsa two\n").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_family-precision"))
        .arg(dir.path())
        .arg(&profile)
        .arg("--quiet")
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn cli_writes_complete_gzip_table() {
    use flate2::read::MultiGzDecoder;
    use std::io::Read;

    let dir = tempfile::tempdir().unwrap();
    let trees = dir.path().join("trees");
    fs::create_dir(&trees).unwrap();
    write_families(&trees);
    let profile = dir.path().join("species.profile");
    fs::write(&profile, PROFILE).unwrap();
    let table = dir.path().join("scores.txt.gz");

    let status = Command::new(env!("CARGO_BIN_EXE_family-precision"))
        .arg(&trees)
        .arg(&profile)
        .arg("-o")
        .arg(&table)
        .arg("--quiet")
        .status()
        .unwrap();
    assert!(status.success());

    let mut text = String::new();
    MultiGzDecoder::new(fs::File::open(&table).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "fam_a 0.3333333333333333\nfam_b 1.0\nfam_c 0.0\nfam_d NaN\n");
}

#[test]
fn cli_reports_scoring_error_and_keeps_earlier_lines() {
    let dir = tempfile::tempdir().unwrap();
    let trees = dir.path().join("trees");
    fs::create_dir(&trees).unwrap();
    write_families(&trees);
    fs::write(trees.join("fam_bb.nwk"), "\n").unwrap();
    let profile = dir.path().join("species.profile");
    fs::write(&profile, PROFILE).unwrap();
    let table = dir.path().join("scores.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_family-precision"))
        .arg(&trees)
        .arg(&profile)
        .arg("-o")
        .arg(&table)
        .arg("--quiet")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed scoring trees"), "stderr was: {stderr}");
    assert_eq!(
        fs::read_to_string(&table).unwrap(),
        "fam_a 0.3333333333333333\nfam_b 1.0\n"
    );
}
