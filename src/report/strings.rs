// Locale string table for report and status prose
//
// One rendering engine, parameterized by this table. The report body
// stays English in both locales, matching the tool this replaces; the
// status lines printed around a run are what differ.

use crate::config::Lang;

/// All user-visible prose, keyed by locale
pub struct Strings {
    // Report headings and labels
    pub title: &'static str,
    pub title_extended: &'static str,
    pub entry_point: &'static str,
    pub root_directory: &'static str,
    pub max_depth: &'static str,
    pub unbounded: &'static str,
    pub files_analyzed: &'static str,
    pub tree: &'static str,
    pub toc: &'static str,
    pub details: &'static str,
    pub path_label: &'static str,
    pub business_purpose: &'static str,
    pub architectural_role: &'static str,
    pub risk_level: &'static str,
    pub error_handling_note: &'static str,
    pub test_file_note: &'static str,
    pub external_dependencies: &'static str,
    pub classes: &'static str,
    pub functions: &'static str,
    pub todos: &'static str,
    pub line_word: &'static str,
    pub more: &'static str,
    pub imports: &'static str,
    pub imported_by: &'static str,
    pub import_errors: &'static str,
    pub summary: &'static str,
    pub risk_distribution: &'static str,
    pub arch_distribution: &'static str,
    pub all_external: &'static str,
    pub files_word: &'static str,
    pub parse_error_note: &'static str,
    pub external_note: &'static str,
    pub not_expanded_note: &'static str,
    pub tree_ref: &'static str,
    pub tree_cutoff: &'static str,
    pub tree_parse_error: &'static str,
    pub tree_external: &'static str,

    // Status prose printed around a run
    pub mapping_from: &'static str,
    pub mapping_from_extended: &'static str,
    pub root_msg: &'static str,
    pub depth_msg: &'static str,
    pub generated: &'static str,
    pub stats: &'static str,
    pub stat_files: &'static str,
    pub stat_errors: &'static str,
    pub entry_missing: &'static str,
}

const EN: Strings = Strings {
    title: "📊 Dependency Map",
    title_extended: "📊 Dependency Map (Extended)",
    entry_point: "Entry point",
    root_directory: "Root directory",
    max_depth: "Max depth",
    unbounded: "unbounded",
    files_analyzed: "Files analyzed",
    tree: "🌲 Dependency Tree",
    toc: "📑 Table of Contents",
    details: "📄 File Details",
    path_label: "Path",
    business_purpose: "Business Purpose",
    architectural_role: "Architectural Role",
    risk_level: "Risk Level",
    error_handling_note: "Has error handling: try/except blocks",
    test_file_note: "Test file",
    external_dependencies: "External Dependencies",
    classes: "Classes",
    functions: "Functions",
    todos: "🚨 TODOs/Issues",
    line_word: "Line",
    more: "more",
    imports: "Imports",
    imported_by: "Imported by",
    import_errors: "⚠️ Import Errors",
    summary: "📊 Summary Statistics",
    risk_distribution: "Risk Distribution",
    arch_distribution: "Architectural Distribution",
    all_external: "All External Dependencies",
    files_word: "files",
    parse_error_note: "⚠️ Could not be parsed; metadata is partial",
    external_note: "Outside the project tree; not traversed",
    not_expanded_note: "Not expanded: depth limit reached",
    tree_ref: "(see above)",
    tree_cutoff: "(depth limit)",
    tree_parse_error: "(parse error)",
    tree_external: "(external)",

    mapping_from: "🔍 Mapping dependencies from",
    mapping_from_extended: "🔍 Mapping dependencies (EXTENDED) from",
    root_msg: "📁 Root directory",
    depth_msg: "⚙️  Max depth",
    generated: "✅ Dependency map generated",
    stats: "📊 Statistics",
    stat_files: "Files",
    stat_errors: "Errors",
    entry_missing: "❌ File does not exist",
};

const CS: Strings = Strings {
    mapping_from: "🔍 Mapuji závislosti od",
    mapping_from_extended: "🔍 Mapuji závislosti (EXTENDED) od",
    root_msg: "📁 Kořenový adresář",
    depth_msg: "⚙️  Max hloubka",
    generated: "✅ Mapa závislostí vygenerována",
    stats: "📊 Statistiky",
    stat_files: "Soubory",
    stat_errors: "Chyby",
    entry_missing: "❌ Soubor neexistuje",
    ..EN
};

impl Strings {
    pub fn for_lang(lang: Lang) -> &'static Strings {
        match lang {
            Lang::En => &EN,
            Lang::Cs => &CS,
        }
    }
}
