//! WADL documents used across suites.

/// URI the fixtures are read under; relative hrefs resolve against it.
pub const ROOT_URI: &str = "http://api.example.com/defs/petstore.wadl";

pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Pet store: `pets` with a templated `{id}` child, plus `stores`.
pub const PETSTORE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<application xmlns="http://wadl.dev.java.net/2009/02"
             xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <doc title="Pet Store"/>
  <resources base="https://api.example.com/v1/">
    <resource path="pets">
      <doc title="Pets"/>
      <param name="limit" style="query" type="xs:int" default="20"/>
      <param name="status" style="query" default="available"/>
      <method name="GET" id="listPets">
        <doc title="List Pets"/>
        <response status="200">
          <representation mediaType="application/json"/>
        </response>
      </method>
      <resource path="{id}">
        <param name="id" style="template" required="true"/>
        <method href="#getPet"/>
      </resource>
    </resource>
    <resource path="stores">
      <method name="GET"/>
    </resource>
  </resources>
  <method name="GET" id="getPet">
    <doc title="Get Pet"/>
    <response status="200">
      <representation mediaType="application/json"/>
    </response>
    <response status="404 410">
      <representation mediaType="application/problem+json"/>
    </response>
  </method>
</application>"##;

/// The pet store without `pets`.
pub const STORES_ONLY: &str = r##"<application xmlns="http://wadl.dev.java.net/2009/02">
  <resources base="https://api.example.com/v1/">
    <resource path="stores">
      <method name="GET"/>
    </resource>
  </resources>
</application>"##;

/// `pets` with a status param that enumerates options.
pub const STATUS_OPTIONS: &str = r##"<application xmlns="http://wadl.dev.java.net/2009/02">
  <resources base="https://api.example.com/v1/">
    <resource path="pets">
      <param name="status" style="query" default="sold">
        <option value="sold"/>
        <option value="pending"/>
      </param>
    </resource>
  </resources>
</application>"##;

/// A POST with one request and two response representations.
pub const ADD_PET: &str = r##"<application xmlns="http://wadl.dev.java.net/2009/02">
  <resources base="https://api.example.com/v1/">
    <resource path="pets">
      <method name="POST" id="addPet">
        <request>
          <param name="dryRun" style="query" default="false"/>
          <representation mediaType="application/json"/>
        </request>
        <response status="201">
          <representation mediaType="application/json"/>
          <representation mediaType="application/xml"/>
        </response>
      </method>
    </resource>
  </resources>
</application>"##;

/// Two `<resources>` groups.
pub const TWO_GROUPS: &str = r##"<application xmlns="http://wadl.dev.java.net/2009/02">
  <resources base="https://a.example.com/api/">
    <resource path="pets"><method name="GET"/></resource>
  </resources>
  <resources base="https://b.example.com/api">
    <resource path="orders"><method name="GET"/></resource>
  </resources>
</application>"##;

/// Legacy 2006/10 dialect with representation status and inline faults.
pub const LEGACY: &str = r##"<application xmlns="http://research.sun.com/wadl/2006/10">
  <doc title="Legacy Pets"/>
  <resources base="http://legacy.example.com/">
    <resource path="pets">
      <method name="GET" id="listPets">
        <response>
          <representation mediaType="application/xml" status="200"/>
          <fault mediaType="text/plain" status="500 503" id="serverError"/>
          <fault mediaType="text/plain" status="oops"/>
        </response>
      </method>
    </resource>
  </resources>
</application>"##;

/// Resource types contributing a method and its params.
pub const RESOURCE_TYPES: &str = r##"<application xmlns="http://wadl.dev.java.net/2009/02">
  <resources base="https://api.example.com/">
    <resource path="pets" type="#pageable">
      <method name="GET" id="listPets"/>
    </resource>
  </resources>
  <resource_type id="pageable">
    <param name="page" style="query" default="1"/>
    <method name="HEAD" id="count"/>
  </resource_type>
</application>"##;

/// References into a shared document at `SHARED_URI`.
pub const REMOTE_REFS: &str = r##"<application xmlns="http://wadl.dev.java.net/2009/02">
  <resources base="https://api.example.com/">
    <resource path="pets">
      <param href="common.wadl#limit"/>
      <method href="common.wadl#getPets"/>
    </resource>
    <resource path="owners">
      <param href="common.wadl#limit"/>
      <param href="missing.wadl#offset"/>
      <method href="common.wadl#getOwners"/>
    </resource>
  </resources>
</application>"##;

/// Resolved location of `common.wadl` relative to [`ROOT_URI`].
pub const SHARED_URI: &str = "http://api.example.com/defs/common.wadl";

pub const SHARED: &str = r##"<application xmlns="http://wadl.dev.java.net/2009/02">
  <param id="limit" name="limit" style="query" default="50"/>
  <method name="GET" id="getPets"><doc title="Get Pets"/></method>
  <method name="GET" id="getOwners"><doc title="Get Owners"/></method>
</application>"##;

/// A method whose verb is not HTTP.
pub const BAD_VERB: &str = r##"<application xmlns="http://wadl.dev.java.net/2009/02">
  <resources base="https://api.example.com/">
    <resource path="pets"><method name="GET"/></resource>
    <resource path="toys"><method name="FROB"/></resource>
    <resource path="zoo"><method name="GET"/></resource>
  </resources>
</application>"##;
