//! `svn --xml` 出力のフィクスチャ

/// `svn list svn://localhost/marssvn/trunk --xml` の出力
pub const LIST_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<lists>
<list
   path="svn://localhost/marssvn/trunk">
<entry
   kind="file">
<name>a.txt</name>
<size>42</size>
</entry>
<entry
   kind="dir">
<name>src</name>
<commit
   revision="5">
<author>alice</author>
<date>2024-01-02T03:04:05.123456Z</date>
</commit>
</entry>
<entry
   kind="file">
<name>design.doc</name>
<size>2048</size>
<commit
   revision="7">
<author>bob</author>
<date>2024-02-01T10:00:00.000000Z</date>
</commit>
<lock>
<token>opaquelocktoken:0c8d4f1e-0000-0000-0000-000000000001</token>
<owner>bob</owner>
<comment>editing the design</comment>
<created>2024-02-03T10:20:30.000000Z</created>
</lock>
</entry>
<entry
   kind="file">
<name>Makefile</name>
<size>0</size>
</entry>
</list>
</lists>"#;

/// `svn info svn://localhost/marssvn/trunk/design.doc --xml` の出力
pub const INFO_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<info>
<entry
   kind="file"
   path="design.doc"
   revision="17">
<url>svn://localhost/marssvn/trunk/design.doc</url>
<relative-url>^/trunk/design.doc</relative-url>
<repository>
<root>svn://localhost/marssvn</root>
<uuid>6b3c6c70-0000-0000-0000-000000000000</uuid>
</repository>
<commit
   revision="7">
<author>bob</author>
<date>2024-02-01T10:00:00.000000Z</date>
</commit>
<lock>
<token>opaquelocktoken:0c8d4f1e-0000-0000-0000-000000000001</token>
<owner>bob</owner>
<comment>editing the design</comment>
<created>2024-02-03T10:20:30.000000Z</created>
</lock>
</entry>
</info>"#;

/// `svn log --xml` の出力
pub const LOG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<log>
<logentry
   revision="17">
<author>carol</author>
<date>2024-03-01T08:00:00.000000Z</date>
<msg>Add design document</msg>
</logentry>
<logentry
   revision="16">
<author>alice</author>
<date>2024-02-28T08:00:00.000000Z</date>
<msg>Initial import</msg>
</logentry>
</log>"#;

/// Head revision reported by the fake `svn`
pub const HEAD_REVISION: u64 = 17;

/// Last-changed revision reported by the fake `svn`
pub const LAST_CHANGED_REVISION: u64 = 12;

/// Password the fake `svn` rejects with E170001
pub const WRONG_PASSWORD: &str = "wrong-password";
