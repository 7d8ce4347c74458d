// ============================================================================
// Minnow - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English interface strings of the minnow-i18n tool
// 边界:
//   - ✅ English translation strings definition
//   - ✅ Translation key-value pairs maintenance
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Catalog loading
    ("catalog.using", "Using catalog %1"),
    (
        "catalog.source_language",
        "No catalog for locale setting '%1', showing source text",
    ),
    ("catalog.load_failed", "Failed to load catalog: %1"),
    // Lookup related
    ("lookup.fallback", "No translation found, showing source text"),
    ("lookup.locations", "Locations:"),
    ("lookup.no_location", "No location recorded"),
    ("lookup.stale", "Entry is %1 and not used for lookup"),
    // Check related
    ("check.start", "Checking translation catalogs..."),
    ("check.no_locales", "No catalogs found to check"),
    ("check.invalid_pattern", "Invalid ignore_contexts pattern: %1"),
    ("check.catalog_header", "Catalog %1"),
    (
        "check.statistics",
        "%1 contexts, %2 messages (%3 active, %4 unfinished, %5 stale)",
    ),
    ("check.issue.unfinished", "unfinished translation"),
    ("check.issue.empty", "empty translation"),
    (
        "check.issue.placeholder",
        "placeholder mismatch (missing: %1, unexpected: %2)",
    ),
    ("check.issue.duplicate", "duplicate entry"),
    ("check.no_issues", "No issues"),
    ("check.summary", "%1 errors, %2 warnings"),
    ("check.all_good", "All catalogs passed"),
    ("check.failed", "Translation catalog check failed"),
    // Format related
    ("fmt.formatted", "Formatted %1"),
    ("fmt.unchanged", "Already formatted: %1"),
    ("fmt.would_change", "Would reformat: %1"),
    ("fmt.check_failed", "%1 file(s) need formatting"),
    ("fmt.read_failed", "Failed to read %1"),
    ("fmt.failed", "%1 file(s) could not be formatted"),
    // List related
    ("list.header", "Available catalogs"),
    ("list.none", "No catalogs available"),
    (
        "list.row",
        "%1: %2 contexts, %3 messages (%4 active, %5 unfinished, %6 stale)",
    ),
    // Init related
    ("init.start", "Initializing minnow-i18n configuration..."),
    ("init.config_exists", "Config file already exists: %1"),
    (
        "init.use_force_hint",
        "Use --force to overwrite existing config file",
    ),
    ("init.config_created", "Config file created: %1"),
    ("init.create_failed", "Failed to create config file: %1"),
    (
        "init.next_steps",
        "You can now edit the config file to point at your catalog directory",
    ),
];
