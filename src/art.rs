const BANNER: &str = r#"
                 _     _ _                             _
 _ __ ___   ___ | |__ (_) | ___  __ _ _ __ __ _ _ __ | |__
| '_ ` _ \ / _ \| '_ \| | |/ _ \/ _` | '__/ _` | '_ \| '_ \
| | | | | | (_) | |_) | | |  __/ (_| | | | (_| | |_) | | | |
|_| |_| |_|\___/|_.__/|_|_|\___|\__, |_|  \__,_| .__/|_| |_|
                                |___/          |_|
"#;

pub fn welcome_message(name: &str) -> String {
    format!(
        "{}\n  {} v{}\n  Type 'help' for commands.\n",
        BANNER,
        name,
        env!("CARGO_PKG_VERSION")
    )
}
