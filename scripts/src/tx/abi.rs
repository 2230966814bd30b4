use alloy::sol;

sol! {
#[sol(rpc)]
interface IMockToken {
    function name() external view returns (string);

    function symbol() external view returns (string);

    function totalSupply() external view returns (uint256);
}

#[sol(rpc)]
contract RetentionRelay {
    constructor(address token);

    function token() external view returns (address);
}
}
