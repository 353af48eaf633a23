use recipe_metadata::{ExclusionRule, Manifest, OptionValue, PackageInfo};

const EXAMPLE: &str = "\
API=2
NAME=think_async
VERSION=1.0
LICENSE=MIT
AUTHOR=Dany
URL=https://github.com/cw118876/grocery.git
DESCRIPTION=A sample package for Think-Async
TOPICS=conan cpp asio
SETTINGS=os compiler build_type arch
OPTIONS=shared=false fPIC=false
GENERATOR=Ninja
SOURCE=git+https://github.com/cw118876/grocery.git
REQUIRES=asio/1.28.2
LIBS=Think-Async
FIND_PACKAGE=Think-Async
_sha_=4539d849d3cea8ac84debad9b3154143
";

fn main() {
    let manifest = Manifest::parse(EXAMPLE).expect("failed to parse manifest");
    let r = &manifest.recipe;

    println!("=== Parsed Recipe ===");
    println!("API:          {}", r.api);
    println!("Name:         {}", r.name);
    println!("Version:      {}", r.version);
    if let Some(ref license) = r.license {
        println!("License:      {}", license);
    }
    println!("Description:  {}", r.description);
    println!(
        "Topics:       {}",
        r.topics.iter().cloned().collect::<Vec<_>>().join(" ")
    );
    println!(
        "Settings:     {}",
        r.settings
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!(
        "Options:      {}",
        r.options
            .decls()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!("Generator:    {}", r.generator);
    if let Some(ref source) = r.source {
        println!("Source:       {}", source);
    }
    println!(
        "Requires:     {}",
        r.requires
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    if let Some(ref checksum) = manifest.checksum {
        println!("Checksum:     {}", checksum);
    }

    println!("\n=== Effective Options (shared build) ===");
    let mut options = r.options.clone();
    options
        .set("shared", OptionValue::Bool(true))
        .expect("shared is declared");
    for (name, value) in options.effective(&ExclusionRule::defaults()) {
        println!("{} = {}", name, value);
    }

    let info = PackageInfo::from_recipe(r);
    println!("\n=== Package Info ===");
    println!("Libs:         {}", info.libs.join(" "));
    println!("Find package: {}", info.find_package);

    println!("\n=== Serialized Back ===");
    print!("{}", manifest.serialize());
}
