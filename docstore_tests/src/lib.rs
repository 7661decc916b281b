//! Integration suites for `docstore_core`, grouped by concern.
