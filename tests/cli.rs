use std::process::Command;

fn dining() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dining-philosophers"));
    // keep the environment from leaking into the flags
    for var in [
        "DINING_PHILOSOPHERS",
        "DINING_THINK_MS",
        "DINING_EAT_MS",
        "DINING_HESITATE_MS",
        "DINING_PROBE_INTERVAL_MS",
        "DINING_SEED",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

// everyone grabs the left chopstick within a few ms and then dawdles
fn starving_table() -> Command {
    let mut cmd = dining();
    cmd.args(["-n", "5", "--think-ms", "0..5", "--hesitate-ms", "300"])
        .args(["--probe-interval-ms", "50", "--seed", "1"]);
    cmd
}

#[test]
fn famine_ends_the_process() {
    let output = starving_table().output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255), "{stdout}");
    #[cfg(not(unix))]
    assert!(!output.status.success());

    let famines = stdout
        .lines()
        .filter(|l| l.contains("everyone's going to starve"))
        .count();
    assert_eq!(famines, 1, "{stdout}");
    assert_eq!(stdout.lines().last().map(|l| l.contains("starve")), Some(true));

    // the famine line on stdout is the only diagnostic
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.is_empty(), "{stderr}");

    for id in 0..5 {
        let left = format!("Philosopher {id} is hungry and picked up the chopstick on the left.");
        assert!(stdout.contains(&left), "{stdout}");
    }
}

#[test]
fn rejects_a_lonely_philosopher() {
    let output = dining().args(["-n", "1"]).output().unwrap();
    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(255));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 2 philosophers"), "{stderr}");
}

#[test]
fn rejects_an_inverted_range() {
    let output = dining().args(["--eat-ms", "10..5"]).output().unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("eat range is inverted"), "{stderr}");
}

#[test]
fn logs_are_plain_when_piped() {
    let output = starving_table().env("RUST_LOG", "info").output().unwrap();
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("famine detected"), "{stderr}");
    assert!(!stderr.contains('\u{1b}'), "{stderr:?}");
}
