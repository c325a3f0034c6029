//! Project templates for `malo create`.
//!
//! - plain - a `main.py` with a `main()` entry point (default)
//! - api - a FastAPI app plus a `run.sh` launcher and `requirements.txt`

/// Packages installed into the venv of an API project.
pub const API_PACKAGES: &[&str] = &["fastapi", "uvicorn"];

pub fn plain_main() -> &'static str {
    r#"def main() -> None:
    print('Hello, World!')


if __name__ == '__main__':
    main()
"#
}

pub fn api_main() -> &'static str {
    r#"from fastapi import FastAPI

app = FastAPI()


@app.get('/')
def index():
    return {'Hello': 'World!'}
"#
}

/// Launcher that activates the venv when present and serves `main:app`.
pub fn api_run_script(venv: &str) -> String {
    format!(
        r#"#!/bin/bash
if [ -d "{venv}" ]; then
    source {venv}/bin/activate
fi

python -m uvicorn main:app --reload
"#
    )
}

pub fn api_requirements() -> String {
    API_PACKAGES
        .iter()
        .map(|pkg| format!("{}\n", pkg))
        .collect()
}

pub fn gitignore(venv: &str, cache_dir: &str) -> String {
    format!("{}/\n{}/\n*.pyc\n", venv, cache_dir)
}
