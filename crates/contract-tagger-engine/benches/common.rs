// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_contract(sections: usize, items: usize) -> String {
    let mut content = String::from("Exhibit 10.1\n\nMASTER SERVICES AGREEMENT\n\n");
    content.push_str("This Agreement is made between the Company and \nthe Supplier.\n\n");

    for section in 1..=sections {
        content.push_str(&format!("Section {section}. Obligations\n"));
        content.push_str("The Supplier shall perform the services with due care and \n");
        content.push_str("in accordance with applicable law.\n");
        for item in 1..=items {
            content.push_str(&format!("{item}. Deliverable number {item} as agreed;\n"));
            if item % 3 == 0 {
                content.push_str("(a) first milestone;\n(b) second milestone;\n");
            }
        }
        if section % 4 == 0 {
            content.push_str("CONFIDENTIAL\n");
        }
        content.push('\n');
    }

    content
}

#[allow(dead_code)]
pub fn generate_large_contract() -> String {
    generate_contract(200, 12)
}
