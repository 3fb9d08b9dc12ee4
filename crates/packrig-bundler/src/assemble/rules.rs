//! Module rules shared by every project kind.

use std::path::Path;

use serde_json::json;

use crate::config::ModuleRule;

pub const SCRIPT_PATTERN: &str = r"\.(js|jsx|ts|tsx)$";

/// Binary assets handled by kinds that inline files into the bundle
pub const MEDIA_PATTERN: &str =
    r"\.(png|jpg|jpeg|webp|gif|svg|woff|woff2|ttf|eot|otf|mp4|flv|webm|mp3|flac|ogg|m4a|aac)$";

pub const IMAGE_PATTERN: &str = r"\.(png|jpg|jpeg|webp|gif|svg|ico)$";

pub const STYLE_PATTERN: &str = r"\.css$";

pub fn base_rules(entry_folder: &Path) -> Vec<ModuleRule> {
    vec![
        ModuleRule::test(SCRIPT_PATTERN).one_of(vec![
            ModuleRule::any()
                .resource_query(r"\?aot$")
                .uses(["aot-loader", "babel-loader"]),
            ModuleRule::any()
                .include(entry_folder.to_string_lossy())
                .loader("babel-loader"),
        ]),
        ModuleRule::test(r"\.(yaml|yml)$").loader("yml-loader"),
        ModuleRule::test(r"\.lines$").loader("lines-loader"),
        ModuleRule::test(r"\.rlines$")
            .loader("lines-loader")
            .options(json!({ "sort": true, "random": true })),
        ModuleRule::test(r"\.txt$").loader("raw-loader"),
        ModuleRule::test(r"\.(hbs|handlebars)$").one_of(vec![
            ModuleRule::any()
                .resource_query(r"\?html")
                .loader("handlebars-loader"),
            ModuleRule::any().loader("handlebars-loader").options(json!({
                "precompileOptions": { "noEscape": true }
            })),
        ]),
    ]
}
