//! Interpreter, venv and pip invocations.
//!
//! [`Python`] pairs an interpreter path with a working directory and turns
//! each operation into an [`Invocation`] for the [`ProcessRunner`]. pip is
//! always reached as `python -m pip` so it installs into whatever environment
//! the interpreter belongs to.

use crate::process::{Invocation, ProcessOutput, ProcessRunner};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct Python<'a> {
    runner: &'a dyn ProcessRunner,
    program: PathBuf,
    cwd: PathBuf,
}

impl<'a> Python<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        program: impl Into<PathBuf>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            cwd: cwd.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(&self.program, &self.cwd)
    }

    /// `python -m venv <dir>`
    pub fn create_venv(&self, dir: &str) -> Result<ProcessOutput> {
        self.runner
            .run(&self.invocation().args(["-m", "venv", dir]))
    }

    /// `python -m pip install <pkgs...>`
    pub fn pip_install<S: AsRef<str>>(&self, packages: &[S]) -> Result<ProcessOutput> {
        let inv = self
            .invocation()
            .args(["-m", "pip", "install"])
            .args(packages.iter().map(|p| p.as_ref().to_string()));
        self.runner.run(&inv)
    }

    /// `python -m pip install -r <file>`
    pub fn pip_install_requirements(&self, file: &Path) -> Result<ProcessOutput> {
        let inv = self
            .invocation()
            .args(["-m", "pip", "install", "-r"])
            .arg(file.to_string_lossy());
        self.runner.run(&inv)
    }

    /// `python -m pip uninstall -y <pkg>`
    pub fn pip_uninstall(&self, package: &str) -> Result<ProcessOutput> {
        self.runner.run(
            &self
                .invocation()
                .args(["-m", "pip", "uninstall", "-y", package]),
        )
    }

    /// `python <script> <args...>`
    pub fn run_script(&self, script: &Path, args: &[String]) -> Result<ProcessOutput> {
        let inv = self
            .invocation()
            .arg(script.to_string_lossy())
            .args(args.iter().cloned());
        self.runner.run(&inv)
    }

    /// `python --version`
    pub fn version(&self) -> Result<ProcessOutput> {
        self.runner.run(&self.invocation().arg("--version"))
    }

    /// `python -m pip --version`
    pub fn pip_version(&self) -> Result<ProcessOutput> {
        self.runner
            .run(&self.invocation().args(["-m", "pip", "--version"]))
    }
}

/// Top-level modules shipped with CPython. Imports of these never become
/// manifest entries.
pub const STDLIB_MODULES: &[&str] = &[
    "__future__", "_thread", "abc", "argparse", "array", "ast", "asyncio", "atexit", "base64",
    "bdb", "binascii", "bisect", "builtins", "bz2", "calendar", "cmath", "cmd", "code",
    "codecs", "collections", "colorsys", "compileall", "concurrent", "configparser",
    "contextlib", "contextvars", "copy", "copyreg", "cProfile", "csv", "ctypes", "curses",
    "dataclasses", "datetime", "dbm", "decimal", "difflib", "dis", "doctest", "email",
    "encodings", "enum", "errno", "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch",
    "fractions", "ftplib", "functools", "gc", "getopt", "getpass", "gettext", "glob",
    "graphlib", "grp", "gzip", "hashlib", "heapq", "hmac", "html", "http", "imaplib",
    "importlib", "inspect", "io", "ipaddress", "itertools", "json", "keyword", "linecache",
    "locale", "logging", "lzma", "mailbox", "marshal", "math", "mimetypes", "mmap",
    "multiprocessing", "netrc", "numbers", "operator", "optparse", "os", "pathlib", "pdb",
    "pickle", "pkgutil", "platform", "plistlib", "poplib", "posix", "pprint", "profile",
    "pstats", "pty", "pwd", "py_compile", "queue", "quopri", "random", "re", "readline",
    "reprlib", "resource", "rlcompleter", "runpy", "sched", "secrets", "select", "selectors",
    "shelve", "shlex", "shutil", "signal", "site", "smtplib", "socket", "socketserver",
    "sqlite3", "ssl", "stat", "statistics", "string", "stringprep", "struct", "subprocess",
    "symtable", "sys", "sysconfig", "syslog", "tabnanny", "tarfile", "tempfile", "termios",
    "textwrap", "threading", "time", "timeit", "tkinter", "token", "tokenize", "tomllib",
    "trace", "traceback", "tracemalloc", "tty", "turtle", "types", "typing", "unicodedata",
    "unittest", "urllib", "uuid", "venv", "warnings", "wave", "weakref", "webbrowser",
    "winreg", "wsgiref", "xml", "xmlrpc", "zipapp", "zipfile", "zipimport", "zlib",
    "zoneinfo",
];

pub fn is_stdlib_module(name: &str) -> bool {
    STDLIB_MODULES.contains(&name)
}
