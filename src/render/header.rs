//! Per-file synthetic header: classes, free functions, then the comment dump.

use super::BANNER;
use crate::model::*;

/// Render everything extracted from one source file.
pub fn render(doc: &FileDoc) -> String {
    let mut out = String::from(BANNER);

    for class in &doc.classes {
        out.push_str(&render_header(class));
        for member in &class.members {
            out.push_str(&render_member(member));
        }
        out.push_str(&format!("}}; // {}\n", class.name));
    }

    out.push_str("\n\n// What follows is a dump of the globalfunctions list\n\n");
    let globals: Vec<String> = doc.globals.iter().map(render_global).collect();
    out.push_str(&format!("namespace {} {{\n{}}}\n", GLOBAL_SCOPE, globals.join("\n")));

    out.push_str("\n\n// What follows is a dump of the comments list\n\n");
    out.push_str(&doc.comments.concat());

    out
}

fn render_header(class: &ClassRecord) -> String {
    match &class.header {
        Some(Header::Registered { descr, .. }) => {
            let parent = class
                .parent()
                .map(|p| format!(" : public {}", p))
                .unwrap_or_default();
            format!(
                "{}\n{}\nclass {}{} {{ \n public:\n",
                brief_line(descr),
                long_line(descr),
                class.name,
                parent
            )
        }
        Some(Header::StaticTable { descr }) => format!(
            "{}\n{}\nclass {} {{ \npublic:\n",
            brief_line(descr),
            long_line(descr),
            class.name
        ),
        // Classes only seen through methods still need an opening
        Some(Header::Virtual) | None => format!("class {} {{\npublic:\n", class.name),
    }
}

fn brief_line(descr: &ClassDescr) -> String {
    if descr.short.is_empty() {
        String::new()
    } else {
        format!("/// \\brief {}", descr.short)
    }
}

fn long_line(descr: &ClassDescr) -> String {
    if descr.long.is_empty() {
        String::new()
    } else {
        format!("/// {}", descr.long)
    }
}

fn render_member(member: &Member) -> String {
    match member {
        Member::Placeholder { name, is_static } => {
            format!("{}void {}() {{ }}\n", static_prefix(*is_static), name)
        }
        Member::Sentinel => format!("void {}() {{ }}\n", FUNCS_HEADER_MARKER),
        Member::Detailed(decl) => format!(
            "{}{} {}({}) {{ /* From '{}' */ }}\n",
            static_prefix(decl.is_static),
            decl.retval.as_deref().unwrap_or("void"),
            decl.method,
            decl.args,
            quote_source(&decl.source)
        ),
    }
}

fn render_global(decl: &FunctionDecl) -> String {
    format!(
        "{} {}({}) {{ /* From '{}' */ }}\n",
        decl.retval.as_deref().unwrap_or("void"),
        decl.method,
        decl.args,
        quote_source(&decl.source)
    )
}

fn static_prefix(is_static: bool) -> &'static str {
    if is_static {
        "static "
    } else {
        ""
    }
}

/// The source line is echoed inside a block comment; keep it from closing it.
fn quote_source(source: &str) -> String {
    source.replace("*/", "* /")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(class: Option<&str>, method: &str, retval: Option<&str>) -> FunctionDecl {
        FunctionDecl {
            is_static: false,
            retval: retval.map(str::to_string),
            class: class.map(str::to_string),
            method: method.to_string(),
            args: String::new(),
            source: format!("* @luafunc {}()", method),
        }
    }

    #[test]
    fn registered_subclass_layout() {
        let mut doc = FileDoc::default();
        let class = doc.class_mut("WallItem");
        class.set_header(Header::Registered {
            descr: ClassDescr::default(),
            parent: Some("BfObject".to_string()),
        });
        class.members.push(Member::Placeholder {
            name: "getGeom".to_string(),
            is_static: false,
        });

        let out = render(&doc);
        assert!(out.contains(
            "\n\nclass WallItem : public BfObject { \n public:\nvoid getGeom() { }\n}; // WallItem\n"
        ));
    }

    #[test]
    fn class_descriptions_precede_declaration() {
        let mut doc = FileDoc::default();
        doc.class_mut("Team").set_header(Header::Registered {
            descr: ClassDescr {
                short: "A team.".to_string(),
                long: "Teams hold players.".to_string(),
            },
            parent: None,
        });
        let out = render(&doc);
        assert!(out.contains("/// \\brief A team.\n/// Teams hold players.\nclass Team { \n public:\n"));
    }

    #[test]
    fn static_and_detailed_members() {
        let mut doc = FileDoc::default();
        let class = doc.class_mut("Geom");
        class.set_header(Header::StaticTable {
            descr: ClassDescr::default(),
        });
        class.members.push(Member::Placeholder {
            name: "polyganize".to_string(),
            is_static: true,
        });
        let mut detailed = decl(Some("Geom"), "triangulate", Some("table"));
        detailed.is_static = true;
        detailed.args = "mixed polygons".to_string();
        class.members.push(Member::Detailed(detailed));
        class.members.push(Member::Sentinel);

        let out = render(&doc);
        assert!(out.contains("class Geom { \npublic:\n"));
        assert!(out.contains("static void polyganize() { }\n"));
        assert!(out.contains(
            "static table triangulate(mixed polygons) { /* From '* @luafunc triangulate()' */ }\n"
        ));
        assert!(out.contains("void DummyConstructor() { }\n}; // Geom\n"));
    }

    #[test]
    fn globals_and_comments_follow_classes() {
        let mut doc = FileDoc::default();
        doc.class_mut("Timer").set_header(Header::Virtual);
        doc.globals.push(decl(None, "getMachineTime", Some("num")));
        doc.globals.push(decl(None, "logprint", None));
        doc.comments.push("/*!\n".to_string());
        doc.comments.push(" \\class Timer\n".to_string());
        doc.comments.push("*/\n".to_string());

        let out = render(&doc);
        let class_at = out.find("class Timer {\npublic:\n}; // Timer\n").unwrap();
        let globals_at = out.find("namespace global {\nnum getMachineTime()").unwrap();
        let comments_at = out.find("/*!\n \\class Timer\n*/\n").unwrap();
        assert!(class_at < globals_at && globals_at < comments_at);
        assert!(out.contains("\nvoid logprint() {"));
        assert!(out.ends_with("*/\n"));
    }

    #[test]
    fn source_cannot_close_the_comment() {
        assert_eq!(quote_source("@luafunc foo() */"), "@luafunc foo() * /");
    }
}
