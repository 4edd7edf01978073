use crate::CommentMap;
use crate::Decorated;
use crate::DirectiveSyntax;
use crate::EnumgenResult;
use crate::File;
use crate::SynthesisReport;
use crate::parse_source;
use crate::render_decorated;
use crate::render_with_map;
use crate::synthesize;

pub(crate) const FRESH_ENUM: &str = "package sample

//variants=foo,bar,baz
type Enum string
";

pub(crate) const FRESH_ENUM_GENERATED: &str = "package sample

//variants=foo,bar,baz
type Enum string

//generated_for=Enum
const (
	EnumFoo Enum = \"foo\"
	EnumBar Enum = \"bar\"
	EnumBaz Enum = \"baz\"
)
";

pub(crate) const GROWN_ENUM: &str = "package sample

//variants=foo,bar,baz,qux
type Enum string

//generated_for=Enum
const (
	EnumFoo Enum = \"foo\"
	EnumBar Enum = \"bar\"
	EnumBaz Enum = \"baz\"
)

func describe() {}
";

pub(crate) const GROWN_ENUM_GENERATED: &str = "package sample

//variants=foo,bar,baz,qux
type Enum string

//generated_for=Enum
const (
	EnumFoo Enum = \"foo\"
	EnumBar Enum = \"bar\"
	EnumBaz Enum = \"baz\"
	EnumQux Enum = \"qux\"
)

func describe() {}
";

pub(crate) const TWO_TYPES: &str = "package sample

// free-floating comment

//variants=a,b
type First string

//variants=x,y
type Second string

//generated_for=Second
const (
	SecondX Second = \"x\"
	SecondY Second = \"y\"
)
";

pub(crate) const TWO_TYPES_GENERATED: &str = "package sample

// free-floating comment

//variants=a,b
type First string

//generated_for=First
const (
	FirstA First = \"a\"
	FirstB First = \"b\"
)

//variants=x,y
type Second string

//generated_for=Second
const (
	SecondX Second = \"x\"
	SecondY Second = \"y\"
)
";

pub(crate) const DUPLICATE_BLOCKS: &str = "package sample

//variants=a
type T string

//generated_for=T
const (
	TStale T = \"stale\"
)

var x = 1

// floating above duplicate

//generated_for=T
const (
	TOther T = \"other\"
)

func main() {}
";

pub(crate) const DUPLICATE_BLOCKS_GENERATED: &str = "package sample

//variants=a
type T string

//generated_for=T
const (
	TA T = \"a\"
)

var x = 1

// floating above duplicate

func main() {}
";

pub(crate) const UNICODE_ENUM: &str = "package sample

//variants=a,über
type Größe string
";

pub(crate) const UNICODE_ENUM_GENERATED: &str = "package sample

//variants=a,über
type Größe string

//generated_for=Größe
const (
	GrößeA Größe = \"a\"
	GrößeÜber Größe = \"über\"
)
";

pub(crate) const NAMESPACED_LAYOUT: &str = "package target

// free floating comment 1

func Foo() {
	// nothing
}

//enum:variants=foo,bar
type EnumWithComments string

// free floating comment 2

func Bar() {
	// nothing
}

//enum:variants=foo,bar,baz
type EnumWithComments2 string

// free floating comment 3

//enum:generated_for=EnumWithComments2
const (
	EnumWithComments2Foo\tEnumWithComments2\t= \"foo\"
)

/* free floating comment 4


 */
";

pub(crate) const NAMESPACED_LAYOUT_GENERATED: &str = "package target

// free floating comment 1

func Foo() {
	// nothing
}

//enum:variants=foo,bar
type EnumWithComments string

//enum:generated_for=EnumWithComments
const (
	EnumWithCommentsFoo EnumWithComments = \"foo\"
	EnumWithCommentsBar EnumWithComments = \"bar\"
)

// free floating comment 2

func Bar() {
	// nothing
}

//enum:variants=foo,bar,baz
type EnumWithComments2 string

// free floating comment 3

//enum:generated_for=EnumWithComments2
const (
	EnumWithComments2Foo EnumWithComments2 = \"foo\"
	EnumWithComments2Bar EnumWithComments2 = \"bar\"
	EnumWithComments2Baz EnumWithComments2 = \"baz\"
)

/* free floating comment 4


 */
";

pub(crate) type Runner = fn(&str, &DirectiveSyntax) -> EnumgenResult<(String, SynthesisReport)>;

/// Parse, synthesize with the side-table binding, and print.
pub(crate) fn run_with_map(
	source: &str,
	syntax: &DirectiveSyntax,
) -> EnumgenResult<(String, SynthesisReport)> {
	let (mut file, mut comments): (File<()>, CommentMap) = parse_source(source)?.into_comment_map();
	let report = synthesize(&mut file, &mut comments, syntax);
	Ok((render_with_map(&file, &comments), report))
}

/// Parse, synthesize with inline decorations, and print.
pub(crate) fn run_decorated(
	source: &str,
	syntax: &DirectiveSyntax,
) -> EnumgenResult<(String, SynthesisReport)> {
	let mut file = parse_source(source)?.into_decorated();
	let report = synthesize(&mut file, &mut Decorated, syntax);
	Ok((render_decorated(&file), report))
}
