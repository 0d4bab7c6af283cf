//! Transpile an HCML page and print the generated C++
//!
//! Usage: cargo run --example render_page [FILE]
//!
//! Without FILE a built-in page is used.

use hcml_core::Session;

const PAGE: &str = r#"<html><body>
<cxx:condition>
    <cxx:case>
        <cxx:var name="user" ptr></cxx:var>
        <cxx:block><cxx:print><cxx:var name="user"><cxx:invoke name="name" ptr></cxx:invoke></cxx:var></cxx:print></cxx:block>
    </cxx:case>
    <cxx:else><cxx:block>Guest</cxx:block></cxx:else>
</cxx:condition>
</body></html>
"#;

fn main() {
    let mut session = Session::new();
    session.set_print_method("resp.write");

    let result = match std::env::args().nth(1) {
        Some(path) => session.parse_file(path),
        None => session.parse(PAGE.as_bytes()),
    };

    match result {
        Ok(()) => println!("{}", session.output_str()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
