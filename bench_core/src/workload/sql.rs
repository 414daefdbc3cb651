//! SQL payloads of the canonical workload

pub const CREATE_TABLE: &str = "\
CREATE TABLE BENCH_DATA (
    ID BIGINT NOT NULL PRIMARY KEY,
    NAME VARCHAR(32),
    CODE VARCHAR(32),
    AMOUNT INTEGER,
    CREATED_AT TIMESTAMP
);
COMMIT;
";

/// Inserts ids `0..row_count` in a single server-side loop.
pub fn bulk_insert(row_count: u64) -> String {
    format!(
        "\
SET TERM ^ ;
EXECUTE BLOCK AS
    DECLARE VARIABLE I BIGINT = 0;
BEGIN
    WHILE (I < {row_count}) DO
    BEGIN
        INSERT INTO BENCH_DATA (ID, NAME, CODE, AMOUNT, CREATED_AT)
        VALUES (:I, 'row-' || :I, LPAD(:I, 12, '0'), MOD(:I, 1000), CAST('NOW' AS TIMESTAMP));
        I = I + 1;
    END
END^
SET TERM ; ^
COMMIT;
"
    )
}

pub const SELECT_QUERIES: &str = "\
SELECT COUNT(*) FROM BENCH_DATA;
SELECT COUNT(*) FROM BENCH_DATA WHERE AMOUNT = 500;
SELECT MAX(CREATED_AT) FROM BENCH_DATA WHERE NAME LIKE 'row-9%';
SELECT FIRST 10 ID, NAME, CODE FROM BENCH_DATA ORDER BY CODE DESC;
";

pub const UPDATE_QUERY: &str = "\
UPDATE BENCH_DATA SET AMOUNT = AMOUNT + 1 WHERE MOD(ID, 10) = 0;
COMMIT;
";

pub const CREATE_INDEX: &str = "\
CREATE INDEX IDX_BENCH_DATA_AMOUNT ON BENCH_DATA (AMOUNT);
COMMIT;
";

pub const ENGINE_FACTS: &str = "\
SET LIST ON;
SELECT
    RDB$GET_CONTEXT('SYSTEM', 'ENGINE_VERSION') AS \"EngineVersion\",
    MON$REMOTE_PROTOCOL AS \"RemoteProtocol\",
    MON$CLIENT_VERSION AS \"ClientVersion\"
FROM MON$ATTACHMENTS
WHERE MON$ATTACHMENT_ID = CURRENT_CONNECTION;
";

pub fn create_database(
    connection_string: &str,
    user: &str,
    password: &str,
    page_size: u32,
) -> String {
    format!(
        "CREATE DATABASE '{}' USER '{}' PASSWORD '{}' PAGE_SIZE {page_size} DEFAULT CHARACTER SET UTF8;\n",
        quote(connection_string),
        quote(user),
        quote(password),
    )
}

/// Escapes a value for use inside a single-quoted SQL literal.
fn quote(value: &str) -> String {
    value.replace('\'', "''")
}
