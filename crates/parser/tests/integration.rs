//! Integration tests for the build-file frontend

use df2b_parser::parse;
use df2b_types::{Instruction, KeyValue};

const DOCKERFILE: &str = r#"# syntax=docker/dockerfile:1
# A fairly ordinary multi-directive build file.
FROM golang:1.22 AS builder
WORKDIR /src
COPY go.mod go.sum ./
RUN go mod download
COPY . .
RUN CGO_ENABLED=0 go build -o /out/server \
    ./cmd/server

FROM alpine:3.20
LABEL org.opencontainers.image.source="https://example.org/repo" \
      org.opencontainers.image.licenses=MIT
ENV PORT=8080 \
    GIN_MODE=release
EXPOSE 8080
COPY --from=builder /out/server /usr/local/bin/server
USER nobody
HEALTHCHECK --interval=30s --timeout=3s CMD wget -q -O /dev/null http://localhost:8080/healthz
ENTRYPOINT ["/usr/local/bin/server"]
"#;

#[test]
fn test_full_dockerfile_parses_in_order() {
    let instructions = parse(DOCKERFILE).unwrap();
    let kinds: Vec<&str> = instructions.iter().map(Instruction::kind).collect();
    assert_eq!(
        kinds,
        [
            "FROM",
            "WORKDIR",
            "COPY",
            "RUN",
            "COPY",
            "RUN",
            "FROM",
            "LABEL",
            "ENV",
            "EXPOSE",
            "COPY",
            "USER",
            "HEALTHCHECK",
            "ENTRYPOINT",
        ]
    );
}

#[test]
fn test_continued_directives_fold() {
    let instructions = parse(DOCKERFILE).unwrap();

    assert_eq!(
        instructions[5],
        Instruction::Run {
            shell: true,
            tokens: vec!["CGO_ENABLED=0 go build -o /out/server ./cmd/server".to_string()],
        }
    );

    assert_eq!(
        instructions[8],
        Instruction::Env {
            pairs: vec![
                KeyValue::new("PORT", "8080"),
                KeyValue::new("GIN_MODE", "release"),
            ],
        }
    );
}

#[test]
fn test_cross_stage_copy_survives() {
    let instructions = parse(DOCKERFILE).unwrap();
    assert_eq!(
        instructions[10],
        Instruction::Copy {
            sources: vec!["/out/server".to_string()],
            dest: "/usr/local/bin/server".to_string(),
            from: "builder".to_string(),
            chown: String::new(),
        }
    );
}

#[test]
fn test_syntax_error_is_fatal_to_the_stage() {
    let err = parse("FROM alpine\nSHELL not-an-array\n").unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("line 2"), "got: {rendered}");
}
