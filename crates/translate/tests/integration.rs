//! End-to-end scenarios: build-file text in, command lines out

use df2b_translate::Engine;
use df2b_types::{StageContext, Tooling};

fn run(text: &str) -> Vec<String> {
    let outcome = Engine::new(Tooling::default()).run_stage(StageContext::new("it"), text);
    assert!(!outcome.failed(), "stage failed: {:?}", outcome.errors);
    outcome.lines.iter().map(ToString::to_string).collect()
}

#[test]
fn test_single_stage_service_image() {
    let text = r#"FROM alpine:3.20 AS runtime
ENV A=1 B=2
WORKDIR /srv
EXPOSE 8080
COPY app.bin /srv/app
USER nobody
STOPSIGNAL SIGTERM
ENTRYPOINT ["/srv/app"]
CMD ["--help"]
"#;
    assert_eq!(
        run(text),
        [
            "FROM alpine:3.20 as runtime",
            "buildah config --env A=1 --env B=2 <container>",
            "buildah config --workingdir /srv <container>",
            "buildah config --port 8080 <container>",
            "buildah copy  <container> app.bin /srv/app",
            "buildah config --user nobody <container>",
            "buildah config --stop-signal SIGTERM <container>",
            r#"buildah config --entrypoint '["/srv/app"]' <container>"#,
            r#"buildah config --cmd '["--help"]' <container>"#,
        ]
    );
}

#[test]
fn test_run_and_healthcheck_rendering() {
    let text = "FROM debian\nRUN apt-get update && apt-get install -y curl\nHEALTHCHECK --interval=1m --retries=3 CMD curl -f http://localhost/\n";
    assert_eq!(
        run(text),
        [
            "FROM debian",
            "buildah run [options] <container> /bin/sh -c 'apt-get update && apt-get install -y curl'",
            "buildah config --healthcheck 'CMD-SHELL curl -f http://localhost/' --healthcheck-retries 3 --healthcheck-interval 60s <container>",
        ]
    );
}

#[test]
fn test_metadata_directives() {
    let text = "FROM scratch\nMAINTAINER Ada <ada@example.org>\nLABEL tier=web zone=\"eu west\"\nARG REVISION\nONBUILD RUN make\nVOLUME /data\nSHELL [\"/bin/bash\", \"-c\"]\n";
    assert_eq!(
        run(text),
        [
            "FROM scratch",
            "buildah config --label maintainer='Ada <ada@example.org>' <container>",
            "buildah config --label tier=web --label zone=eu west <container>",
            "buildah config --arg REVISION <container>",
            "buildah config --onbuild 'RUN make' <container>",
            "buildah config --volume /data <container>",
            r#"buildah config --shell '["/bin/bash","-c"]' <container>"#,
        ]
    );
}

#[test]
fn test_mixed_good_and_bad_records() {
    let mut engine = Engine::new(Tooling::default());

    let bad = engine.run_stage(StageContext::new("bad"), "FROM a\nVVOLUME /x\n");
    assert!(bad.failed());
    assert_eq!(bad.lines.len(), 1, "siblings still translate");

    let good = engine.run_stage(StageContext::new("good"), "FROM b\n");
    assert!(!good.failed());
    assert_eq!(good.lines[0].to_string(), "FROM b");
}
